mod claim;
mod review;
mod status;
mod submit;
mod update;

pub use claim::*;
pub use review::*;
pub use submit::*;
pub use update::*;

#[derive(Clone)]
pub struct Command(pub sqlx::SqlitePool);

pub(crate) fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
