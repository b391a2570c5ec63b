pub mod config;
pub mod db;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

mod assets;

pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::AppState;
