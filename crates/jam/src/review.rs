use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Answer to "did the jam happen when you went?".
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Happened {
    #[default]
    Yes,
    No,
    Unknown,
}

impl Happened {
    pub fn to_flag(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Unknown => None,
        }
    }

    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Yes,
            Some(false) => Self::No,
            None => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Happening recently",
            Self::No => "Reported not happening",
            Self::Unknown => "Status unknown",
        }
    }
}

/// Rating columns of a single review.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReviewScores {
    pub overall: Option<i64>,
    pub networking: Option<i64>,
    pub info_accuracy: Option<i64>,
    pub happened: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReviewStats {
    pub overall: Option<f64>,
    pub networking: Option<f64>,
    pub info_accuracy: Option<f64>,
    pub checkins: usize,
    pub off_nights: usize,
    pub count: usize,
}

impl ReviewStats {
    pub fn from_reviews<I: IntoIterator<Item = ReviewScores>>(reviews: I) -> Self {
        let reviews = reviews.into_iter().collect::<Vec<_>>();

        Self {
            overall: average(reviews.iter().map(|r| r.overall)),
            networking: average(reviews.iter().map(|r| r.networking)),
            info_accuracy: average(reviews.iter().map(|r| r.info_accuracy)),
            checkins: reviews.iter().filter(|r| r.happened == Some(true)).count(),
            off_nights: reviews.iter().filter(|r| r.happened == Some(false)).count(),
            count: reviews.len(),
        }
    }

    pub fn overall_label(&self) -> String {
        format_rating(self.overall)
    }

    pub fn networking_label(&self) -> String {
        format_rating(self.networking)
    }

    pub fn info_accuracy_label(&self) -> String {
        format_rating(self.info_accuracy)
    }
}

fn average(values: impl Iterator<Item = Option<i64>>) -> Option<f64> {
    let values = values.flatten().collect::<Vec<_>>();
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

pub fn format_rating(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}"),
        None => "--".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn scores(overall: Option<i64>, happened: Option<bool>) -> ReviewScores {
        ReviewScores {
            overall,
            networking: Some(3),
            info_accuracy: None,
            happened,
        }
    }

    #[test]
    fn test_stats_average_present_values() {
        let stats = ReviewStats::from_reviews([
            scores(Some(5), Some(true)),
            scores(Some(4), Some(true)),
            scores(None, Some(false)),
            scores(Some(4), None),
        ]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.checkins, 2);
        assert_eq!(stats.off_nights, 1);
        assert_eq!(stats.overall_label(), "4.3");
        assert_eq!(stats.networking_label(), "3.0");
        assert_eq!(stats.info_accuracy, None);
        assert_eq!(stats.info_accuracy_label(), "--");
    }

    #[test]
    fn test_stats_without_reviews() {
        let stats = ReviewStats::from_reviews([]);

        assert_eq!(stats, ReviewStats::default());
        assert_eq!(stats.overall_label(), "--");
    }

    #[test]
    fn test_happened_round_trip_labels() {
        assert_eq!(Happened::from_str("no").unwrap(), Happened::No);
        assert_eq!(Happened::No.to_flag(), Some(false));
        assert_eq!(Happened::from_flag(None), Happened::Unknown);
        assert_eq!(Happened::from_flag(Some(true)).label(), "Happening recently");
        assert_eq!(Happened::Unknown.label(), "Status unknown");
        assert_eq!(Happened::Unknown.to_string(), "unknown");
    }
}
