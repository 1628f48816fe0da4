pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::QuizConfig;

pub use adapters::source::{AnySource, BundledSource, LocalSource, SourceSpec};
pub use core::loader::{CatalogLoader, CatalogStore};
pub use core::matcher::{grade, nearest, DEFAULT_TOLERANCE};
pub use core::parser::{parse, parse_bytes};
pub use core::session::{QuizSession, Score};
pub use domain::model::{Catalog, Coordinate, GradeOutcome, MatchResult, Point, Verdict};
pub use utils::error::{QuizError, Result};
