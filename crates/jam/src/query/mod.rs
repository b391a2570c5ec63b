mod claim;
mod jam;
mod review;

pub use claim::*;
pub use jam::*;
pub use review::*;

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
