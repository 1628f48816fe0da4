pub mod loader;
pub mod matcher;
pub mod parser;
pub mod session;

pub use crate::domain::model::{Catalog, Coordinate, GradeOutcome, MatchResult, Point, Verdict};
pub use crate::domain::ports::SourceLoader;
pub use crate::utils::error::Result;
