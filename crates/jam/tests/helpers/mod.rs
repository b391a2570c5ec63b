use std::{path::PathBuf, str::FromStr};

use jamguide_jam::{Command, JamStatus, Query, SubmitJamInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct State {
    pub command: Command,
    pub query: Query,
    pub pool: SqlitePool,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    jamguide_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        command: Command(pool.clone()),
        query: Query(pool.clone()),
        pool,
    })
}

#[allow(dead_code)]
pub fn jam_input(name: impl Into<String>) -> SubmitJamInput {
    SubmitJamInput {
        event_name: name.into(),
        city: "Berkeley".to_owned(),
        region: "East Bay".to_owned(),
        day_of_week: Some("Mon".to_owned()),
        frequency: Some("weekly".to_owned()),
        start_time: Some("7pm".to_owned()),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub async fn create_jam(state: &State, name: impl Into<String>) -> anyhow::Result<i64> {
    Ok(state
        .command
        .submit(jam_input(name), JamStatus::Active)
        .await?)
}

#[allow(dead_code)]
pub async fn create_jam_all(
    state: &State,
    inputs: impl IntoIterator<Item = SubmitJamInput>,
) -> anyhow::Result<Vec<i64>> {
    let mut ids = vec![];
    for input in inputs.into_iter() {
        ids.push(state.command.submit(input, JamStatus::Active).await?);
    }

    Ok(ids)
}
