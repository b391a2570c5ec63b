mod calendar;
mod clock;
mod filter;
mod notable;
mod review;
mod schedule;
mod types;

pub use calendar::*;
pub use clock::*;
pub use filter::*;
pub use notable::*;
pub use review::*;
pub use schedule::*;
pub use types::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod query;

        pub use command::*;
        pub use query::*;
    }
}
