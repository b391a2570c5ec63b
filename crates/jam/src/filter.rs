use std::collections::{BTreeMap, HashMap};

/// One selectable chip. `slug` travels in the URL, `db_values` are matched against
/// the stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub label: &'static str,
    pub slug: &'static str,
    pub db_values: &'static [&'static str],
}

macro_rules! option {
    ($label:expr, $slug:expr, [$($value:expr),+ $(,)?]) => {
        FilterOption {
            label: $label,
            slug: $slug,
            db_values: &[$($value),+],
        }
    };
    ($label:expr, $value:expr) => {
        FilterOption {
            label: $label,
            slug: $value,
            db_values: &[$value],
        }
    };
}

pub const REGION_OPTIONS: &[FilterOption] = &[
    option!("San Francisco", "sf", ["San Francisco"]),
    option!("East Bay", "east_bay", ["East Bay"]),
    option!("North Bay", "north_bay", ["Marin County", "Sonoma County"]),
    option!("South Bay", "south_bay", ["South Bay"]),
    option!("Peninsula", "peninsula", ["Peninsula"]),
];

pub const CITY_OPTIONS: &[FilterOption] = &[
    option!("Berkeley", "Berkeley"),
    option!("San Francisco", "San Francisco"),
    option!("Fairfax", "Fairfax"),
    option!("Graton", "Graton"),
    option!("Bolinas", "Bolinas"),
];

pub const GREATER_REGION_OPTIONS: &[FilterOption] = &[
    option!("Northern California", "Northern California"),
    option!("Southern California", "Southern California"),
];

// Older rows store Thursday as "Thur", the submit form stores "Thu".
pub const DAY_OF_WEEK_OPTIONS: &[FilterOption] = &[
    option!("Mon", "Mon", ["Mon"]),
    option!("Tue", "Tue", ["Tue"]),
    option!("Wed", "Wed", ["Wed"]),
    option!("Thu", "Thur", ["Thur", "Thu"]),
    option!("Fri", "Fri", ["Fri"]),
    option!("Sat", "Sat", ["Sat"]),
    option!("Sun", "Sun", ["Sun"]),
];

pub const TIME_OF_DAY_OPTIONS: &[FilterOption] = &[
    option!("Daytime", "daytime", ["morning"]),
    option!("Evening", "evening", ["evening"]),
    option!("Nighttime", "nighttime", ["nightime", "late_night"]),
];

pub const GENRE_OPTIONS: &[FilterOption] = &[
    option!("Bluegrass", "bluegrass", ["bluegrass"]),
    option!("Jazz", "jazz", ["jazz"]),
    option!("Jam Band", "jam_band", ["jam_band"]),
];

pub const SKILL_LEVEL_OPTIONS: &[FilterOption] = &[
    option!(
        "Beginner Friendly",
        "beginner_friendly",
        ["Begginer", "Begginer_Intermediate", "all_skill_levels"]
    ),
    option!(
        "Mixed",
        "mixed",
        ["Intermediate", "Advanced_Intermediate", "all_skill_levels"]
    ),
    option!("Advanced", "advanced", ["Advanced", "Advanced_Intermediate"]),
    option!("Pro", "pro", ["Pro"]),
];

pub const INVITE_OPTIONS: &[FilterOption] = &[
    option!("Public / Walk-in", "public"),
    option!("Contact for Invite", "contact_for_invite"),
    option!("Invite Only", "invite_only"),
    option!("Jam-bot Operated", "jam_bot_operated"),
];

pub const CROWD_OPTIONS: &[FilterOption] = &[
    option!("Small", "small"),
    option!("Medium", "medium"),
    option!("Large", "large"),
    option!("Fluctuates", "fluctuates"),
    option!("Small but Growing", "small_but_growing"),
    option!("Medium and Growing", "medium_and_growing"),
];

pub const COVER_TYPE_OPTIONS: &[FilterOption] = &[
    option!("Free", "free"),
    option!("Suggested Donation", "suggested_donation"),
    option!("Paid / Cover Charge", "cost_money"),
    option!("Other / TBD", "etc."),
];

pub const EVENT_KIND_OPTIONS: &[FilterOption] = &[
    option!("Jam Session", "jam_session"),
    option!("Concert / Performance", "concert"),
    option!("Dance", "dance"),
    option!("Workshop", "workshop"),
    option!("Class", "class"),
    option!("Retreat", "retreat"),
    option!("Camp", "camp"),
    option!("Festival", "festival"),
    option!("Other", "other"),
];

/// "Biweekly" deliberately selects `1nd_3th_monthly` rows, while the calendar
/// treats that value as a first-week monthly.
pub const FREQUENCY_OPTIONS: &[FilterOption] = &[
    option!("Weekly", "weekly", ["weekly"]),
    option!("Biweekly", "biweekly", ["1nd_3th_monthly"]),
    option!(
        "Monthly",
        "monthly",
        ["monthly", "1st_monthly", "2nd_monthly", "3rd_monthly", "4th_monthly"]
    ),
    option!("2nd 4th Monthly", "2nd_4th_monthly", ["2nd_4th_monthly"]),
    option!("One Off", "one_off", ["one_off"]),
];

/// Union of the DB values behind the selected slugs, in catalogue order, without
/// duplicates.
pub fn db_values_for_selected<S: AsRef<str>>(
    options: &[FilterOption],
    selected_slugs: &[S],
) -> Vec<String> {
    let mut values: Vec<String> = vec![];

    for option in options {
        if !selected_slugs.iter().any(|s| s.as_ref() == option.slug) {
            continue;
        }

        for value in option.db_values {
            if !values.iter().any(|v| v == value) {
                values.push((*value).to_owned());
            }
        }
    }

    values
}

/// Like [`db_values_for_selected`], but entries that are not a known slug are
/// taken as raw column values, so hand-written links keep working.
pub fn resolve_values<S: AsRef<str>>(options: &[FilterOption], selected: &[S]) -> Vec<String> {
    let mut values: Vec<String> = vec![];

    for selected in selected {
        let selected = selected.as_ref();
        let expanded: Vec<&str> = match options.iter().find(|o| o.slug == selected) {
            Some(option) => option.db_values.to_vec(),
            None => vec![selected],
        };

        for value in expanded {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_owned());
            }
        }
    }

    values
}

/// Comma separated query value into its trimmed, non-empty parts.
pub fn parse_list_param(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterAxis {
    pub key: &'static str,
    pub title: &'static str,
    pub options: &'static [FilterOption],
}

pub const FILTER_AXES: &[FilterAxis] = &[
    FilterAxis { key: "regions", title: "Region", options: REGION_OPTIONS },
    FilterAxis { key: "cities", title: "City", options: CITY_OPTIONS },
    FilterAxis { key: "greater_regions", title: "Greater region", options: GREATER_REGION_OPTIONS },
    FilterAxis { key: "dow", title: "Day", options: DAY_OF_WEEK_OPTIONS },
    FilterAxis { key: "tod", title: "Time of day", options: TIME_OF_DAY_OPTIONS },
    FilterAxis { key: "genres", title: "Genre", options: GENRE_OPTIONS },
    FilterAxis { key: "skills", title: "Skill level", options: SKILL_LEVEL_OPTIONS },
    FilterAxis { key: "invite", title: "Access", options: INVITE_OPTIONS },
    FilterAxis { key: "crowd", title: "Crowd size", options: CROWD_OPTIONS },
    FilterAxis { key: "cover_type", title: "Cover", options: COVER_TYPE_OPTIONS },
    FilterAxis { key: "kind", title: "Event type", options: EVENT_KIND_OPTIONS },
    FilterAxis { key: "freq", title: "Frequency", options: FREQUENCY_OPTIONS },
];

pub const FILTER_FLAGS: &[(&str, &str)] = &[
    ("is_house_jam", "House jams only"),
    ("dancing", "Includes dancing"),
    ("notable", "Notable only"),
];

/// Equality and membership criteria for the listing. Each `Vec` holds column
/// values; an empty one imposes no restriction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JamFilter {
    pub regions: Vec<String>,
    pub cities: Vec<String>,
    pub greater_regions: Vec<String>,
    pub house_jam_only: bool,
    pub days: Vec<String>,
    pub times_of_day: Vec<String>,
    pub genres: Vec<String>,
    pub skills: Vec<String>,
    pub invite: Vec<String>,
    pub crowd: Vec<String>,
    pub cover_types: Vec<String>,
    pub dancing_only: bool,
    pub kinds: Vec<String>,
    pub frequencies: Vec<String>,
    pub notable_only: bool,
}

impl JamFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The recognised listing parameters, kept as the raw strings found in the URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingParams(BTreeMap<String, String>);

impl ListingParams {
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        let known = FILTER_AXES
            .iter()
            .map(|a| a.key)
            .chain(FILTER_FLAGS.iter().map(|(key, _)| *key));

        let map = known
            .filter_map(|key| {
                let value = params.get(key)?.trim();
                (!value.is_empty()).then(|| (key.to_owned(), value.to_owned()))
            })
            .collect();

        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self, key: &str) -> Vec<String> {
        parse_list_param(self.0.get(key).map(String::as_str))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| v == "1")
    }

    pub fn is_selected(&self, key: &str, slug: &str) -> bool {
        self.values(key).iter().any(|v| v == slug)
    }

    /// Copy with `slug` added to or removed from the `key` list.
    pub fn toggled(&self, key: &str, slug: &str) -> Self {
        let mut values = self.values(key);

        match values.iter().position(|v| v == slug) {
            Some(index) => {
                values.remove(index);
            }
            None => values.push(slug.to_owned()),
        }

        let mut next = self.clone();
        if values.is_empty() {
            next.0.remove(key);
        } else {
            next.0.insert(key.to_owned(), values.join(","));
        }

        next
    }

    pub fn toggled_flag(&self, key: &str) -> Self {
        let mut next = self.clone();
        if self.flag(key) {
            next.0.remove(key);
        } else {
            next.0.insert(key.to_owned(), "1".to_owned());
        }

        next
    }

    pub fn query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path` followed by the query string, if any.
    pub fn href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_owned()
        } else {
            format!("{path}?{}", self.query_string())
        }
    }

    pub fn filter(&self) -> JamFilter {
        let axis = |key: &str| {
            let options = FILTER_AXES
                .iter()
                .find(|a| a.key == key)
                .map(|a| a.options)
                .unwrap_or_default();

            resolve_values(options, &self.values(key))
        };

        JamFilter {
            regions: axis("regions"),
            cities: axis("cities"),
            greater_regions: axis("greater_regions"),
            house_jam_only: self.flag("is_house_jam"),
            days: axis("dow"),
            times_of_day: axis("tod"),
            genres: axis("genres"),
            skills: axis("skills"),
            invite: axis("invite"),
            crowd: axis("crowd"),
            cover_types: axis("cover_type"),
            dancing_only: self.flag("dancing"),
            kinds: axis("kind"),
            frequencies: axis("freq"),
            notable_only: self.flag("notable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterChip {
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct FilterGroup {
    pub title: &'static str,
    pub chips: Vec<FilterChip>,
}

/// Toggle links for every axis and flag, pointing at `path`.
pub fn filter_groups(params: &ListingParams, path: &str) -> Vec<FilterGroup> {
    let mut groups = FILTER_AXES
        .iter()
        .map(|axis| FilterGroup {
            title: axis.title,
            chips: axis
                .options
                .iter()
                .map(|option| FilterChip {
                    label: option.label,
                    href: params.toggled(axis.key, option.slug).href(path),
                    selected: params.is_selected(axis.key, option.slug),
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    groups.push(FilterGroup {
        title: "More",
        chips: FILTER_FLAGS
            .iter()
            .map(|&(key, label)| FilterChip {
                label,
                href: params.toggled_flag(key).href(path),
                selected: params.flag(key),
            })
            .collect(),
    });

    groups
}
