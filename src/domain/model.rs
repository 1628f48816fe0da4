use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One authored reference point on the diagram.
///
/// `name` doubles as the display label and the matching key. `body_part`
/// carries the same value until richer authoring data exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub body_part: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Point {
    /// Returns `None` for an empty label; every point must be nameable.
    pub fn new(label: impl Into<String>, x: Option<f64>, y: Option<f64>) -> Option<Self> {
        let name = label.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            body_part: name.clone(),
            name,
            x,
            y,
        })
    }

    /// Both axes, when the point has been authored with spatial data.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Coordinate { x, y }),
            _ => None,
        }
    }

    pub fn has_coordinate(&self) -> bool {
        self.coordinate().is_some()
    }
}

/// A location expressed as fractions of the image width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Ordered set of points loaded from one source. Rebuilt, never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    points: Vec<Point>,
}

impl Catalog {
    /// Builds a catalog from points that are already in display order.
    pub(crate) fn from_sorted(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// First point carrying `name`, matching case-sensitively.
    pub fn get(&self, name: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.name.as_str()).collect()
    }

    /// Names appearing more than once, in catalog order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for point in &self.points {
            *counts.entry(point.name.as_str()).or_default() += 1;
        }

        let mut duplicates: Vec<&str> = Vec::new();
        for point in &self.points {
            let name = point.name.as_str();
            if counts[name] > 1 && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Serializes the catalog back to `name,x,y` CSV. Absent axes become
    /// empty fields.
    ///
    /// Names are always wrapped in one pair of quotes and never escaped: the
    /// reader strips exactly one surrounding pair, and a parsed name cannot
    /// contain a comma or edge whitespace.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(Vec::new());

        writer.write_record(["name", "x", "y"])?;
        for point in &self.points {
            let name = format!("\"{}\"", point.name);
            let x = point.x.map(|v| v.to_string()).unwrap_or_default();
            let y = point.y.map(|v| v.to_string()).unwrap_or_default();
            writer.write_record([name.as_str(), x.as_str(), y.as_str()])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| crate::utils::error::QuizError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The nearest authored point to a query and how far away it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub point: Point,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeOutcome {
    pub correct: bool,
    pub nearest: Point,
    pub guess: String,
    pub distance: f64,
    pub tolerance: f64,
}

/// Result of a grading request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Graded(GradeOutcome),
    /// No tap has been recorded yet.
    NoQuery,
    /// The catalog has no point with both coordinates.
    NoReferenceData,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Graded(outcome) if outcome.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mirrors_name_into_body_part() {
        let point = Point::new("Tragus", Some(0.1), None).unwrap();
        assert_eq!(point.name, "Tragus");
        assert_eq!(point.body_part, "Tragus");
        assert!(point.coordinate().is_none());
    }

    #[test]
    fn test_point_requires_a_name() {
        assert!(Point::new("", Some(0.1), Some(0.1)).is_none());
    }

    #[test]
    fn test_duplicate_names() {
        let catalog = Catalog::from_sorted(vec![
            Point::new("Helix", Some(0.1), Some(0.1)).unwrap(),
            Point::new("Helix", Some(0.2), Some(0.2)).unwrap(),
            Point::new("Lobule", None, None).unwrap(),
        ]);
        assert_eq!(catalog.duplicate_names(), vec!["Helix"]);
        assert_eq!(catalog.get("Helix").unwrap().x, Some(0.1));
    }

    #[test]
    fn test_to_csv_writes_empty_axes() {
        let catalog = Catalog::from_sorted(vec![
            Point::new("Antitragus", Some(0.25), Some(0.5)).unwrap(),
            Point::new("Concha", None, Some(0.75)).unwrap(),
        ]);
        let csv = catalog.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec!["name,x,y", "\"Antitragus\",0.25,0.5", "\"Concha\",,0.75"]
        );
    }

    #[test]
    fn test_to_csv_reparses_quoted_and_comment_like_names() {
        let catalog = crate::core::parser::parse(
            "Darwin \"Tubercle\",0.1,0.2\n\"#3 Point\",0.3,0.4\n\",0.5,0.5\n\"\"Helix\"\",,0.6\nname,0.7,0.7",
        );
        assert_eq!(catalog.len(), 5);

        let reparsed = crate::core::parser::parse(&catalog.to_csv().unwrap());
        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn test_verdict_serializes_with_status_tag() {
        let json = serde_json::to_value(Verdict::NoQuery).unwrap();
        assert_eq!(json["status"], "no_query");
    }
}
