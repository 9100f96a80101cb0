mod browser;
mod catalog;
mod error;
mod job;

pub use browser::{Browser, LoadOutcome, LoadTicket, View};
pub use catalog::{Catalog, Field, FilterSelection, SortKey, Vocabulary};
pub use error::{LoadError, Result};
pub use job::{parse_posted, Job, PostedAge, RawJob};

pub fn init_logger(default_level: log::LevelFilter) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
