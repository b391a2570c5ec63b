use clap::{Args, ValueEnum};
use jamguide::config::Config;
use jamguide_jam::{ClaimStatus, Command, JamStatus, Query, UpdateJamInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ClaimStatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<ClaimStatusArg> for ClaimStatus {
    fn from(value: ClaimStatusArg) -> Self {
        match value {
            ClaimStatusArg::Pending => ClaimStatus::Pending,
            ClaimStatusArg::Approved => ClaimStatus::Approved,
            ClaimStatusArg::Rejected => ClaimStatus::Rejected,
        }
    }
}

/// Fields for `jams edit`. Pass an empty string to clear an optional field.
#[derive(Debug, Clone, Default, Args)]
pub struct JamEditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    venue: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    /// Mon, Tue, ... or the full day name
    #[arg(long)]
    day: Option<String>,
    /// 24h (19:30) or 12h (7:30 pm)
    #[arg(long)]
    start_time: Option<String>,
    #[arg(long)]
    end_time: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    contact_email: Option<String>,
}

impl From<JamEditArgs> for UpdateJamInput {
    fn from(args: JamEditArgs) -> Self {
        UpdateJamInput {
            event_name: args.name,
            venue_name: args.venue,
            address: args.address,
            city: args.city,
            state: args.state,
            day_of_week: args.day,
            start_time: args.start_time,
            end_time: args.end_time,
            start_date: args.start_date,
            end_date: args.end_date,
            event_description: args.description,
            website_url: args.website,
            contact_email: args.contact_email,
        }
    }
}

async fn connect(config: &Config) -> anyhow::Result<(Query, Command)> {
    let pool = jamguide::create_pool(&config.database.url, 1).await?;

    Ok((Query(pool.clone()), Command(pool)))
}

#[tracing::instrument(skip(config))]
pub async fn list_claims(config: Config, status: Option<ClaimStatusArg>) -> anyhow::Result<()> {
    let (query, _) = connect(&config).await?;
    let claims = query.claims(status.map(Into::into)).await?;

    if claims.is_empty() {
        println!("No claims");
        return Ok(());
    }

    for claim in claims {
        println!(
            "#{:<5} {:<9} jam #{:<5} {:<40} {} {}",
            claim.id,
            claim.status.0.to_string(),
            claim.jam_id,
            claim.event_name,
            claim.claimant_email,
            claim.phone_number.as_deref().unwrap_or("-"),
        );

        if let Some(notes) = claim.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            println!("       {notes}");
        }
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn approve_claim(config: Config, id: i64) -> anyhow::Result<()> {
    let (query, command) = connect(&config).await?;

    let Some(claim) = query.find_claim(id).await? else {
        tracing::error!("claim {id} not found");
        return Ok(());
    };

    command.approve_claim(id).await?;

    tracing::info!(
        "{} now owns jam #{} ({})",
        claim.claimant_email,
        claim.jam_id,
        claim.event_name
    );

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reject_claim(config: Config, id: i64) -> anyhow::Result<()> {
    let (_, command) = connect(&config).await?;

    command.reject_claim(id).await?;

    tracing::info!("claim {id} rejected");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn list_pending(config: Config) -> anyhow::Result<()> {
    let (query, _) = connect(&config).await?;
    let jams = query.pending().await?;

    if jams.is_empty() {
        println!("No pending jams");
        return Ok(());
    }

    for jam in jams {
        println!(
            "#{:<5} {:<40} {:<30} {}",
            jam.id,
            jam.name(),
            jam.location(),
            jam.when()
        );
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn set_status(config: Config, id: i64, status: JamStatus) -> anyhow::Result<()> {
    let (_, command) = connect(&config).await?;

    command.set_status(id, status).await?;

    tracing::info!("jam {id} is now {status}");

    Ok(())
}

#[tracing::instrument(skip(config, fields))]
pub async fn edit(config: Config, id: i64, fields: JamEditArgs) -> anyhow::Result<()> {
    let (query, command) = connect(&config).await?;

    command.update_jam(id, fields.into()).await?;

    if let Some(jam) = query.find(id).await? {
        println!(
            "#{:<5} {:<40} {:<30} {}",
            jam.id,
            jam.name(),
            jam.location(),
            jam.when()
        );
    }

    tracing::info!("jam {id} updated");

    Ok(())
}
