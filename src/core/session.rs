use crate::core::matcher::{self, DEFAULT_TOLERANCE};
use crate::domain::model::{Catalog, Coordinate, Point, Verdict};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_tolerance};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub attempts: u32,
    pub correct: u32,
}

/// State behind one quiz screen: the catalog in use, the pending tap and
/// the running score.
#[derive(Debug, Clone)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    tap: Option<Coordinate>,
    tolerance: f64,
    score: Score,
}

impl QuizSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            tap: None,
            tolerance: DEFAULT_TOLERANCE,
            score: Score::default(),
        }
    }

    pub fn with_tolerance(catalog: Arc<Catalog>, tolerance: f64) -> Result<Self> {
        let mut session = Self::new(catalog);
        session.set_tolerance(tolerance)?;
        Ok(session)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Switches to a freshly loaded catalog. The pending tap is dropped; the
    /// score carries over.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        self.tap = None;
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<()> {
        validate_tolerance("tolerance", tolerance)?;
        self.tolerance = tolerance;
        Ok(())
    }

    pub fn tap(&self) -> Option<Coordinate> {
        self.tap
    }

    pub fn record_tap(&mut self, x: f64, y: f64) -> Result<Coordinate> {
        validate_range("tap.x", x, 0.0, 1.0)?;
        validate_range("tap.y", y, 0.0, 1.0)?;
        let coordinate = Coordinate::new(x, y);
        self.tap = Some(coordinate);
        Ok(coordinate)
    }

    pub fn clear_tap(&mut self) {
        self.tap = None;
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn reset_score(&mut self) {
        self.score = Score::default();
    }

    /// Every name the user can pick from, in catalog order.
    pub fn selectable_names(&self) -> Vec<&str> {
        self.catalog.names()
    }

    pub fn authored_points(&self) -> Vec<&Point> {
        self.catalog.iter().filter(|p| p.has_coordinate()).collect()
    }

    /// Grades `guess` against the pending tap. Signals do not count as
    /// attempts.
    pub fn submit_guess(&mut self, guess: &str) -> Verdict {
        let verdict = matcher::grade(&self.catalog, self.tap, guess, self.tolerance);
        if let Verdict::Graded(outcome) = &verdict {
            self.score.attempts += 1;
            if outcome.correct {
                self.score.correct += 1;
            }
        }
        verdict
    }
}
