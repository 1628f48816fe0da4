use crate::domain::model::{Catalog, Coordinate, GradeOutcome, MatchResult, Verdict};

/// Reference tolerance: 4% of the normalized span.
pub const DEFAULT_TOLERANCE: f64 = 0.04;

/// Finds the authored point closest to `query`.
///
/// Points missing either axis are ignored. Equal distances resolve to the
/// point that comes first in catalog order.
pub fn nearest(catalog: &Catalog, query: Coordinate) -> Option<MatchResult> {
    let mut best: Option<MatchResult> = None;

    for point in catalog {
        let Some(coordinate) = point.coordinate() else {
            continue;
        };
        let distance = query.distance_to(&coordinate);

        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(MatchResult {
                point: point.clone(),
                distance,
            });
        }
    }

    best
}

/// Grades `guess` against the point nearest to `query`.
///
/// A guess is correct only when it names the nearest point exactly and that
/// point lies within `tolerance` (inclusive) of the query.
pub fn grade(
    catalog: &Catalog,
    query: Option<Coordinate>,
    guess: &str,
    tolerance: f64,
) -> Verdict {
    let Some(query) = query else {
        return Verdict::NoQuery;
    };
    let Some(matched) = nearest(catalog, query) else {
        return Verdict::NoReferenceData;
    };

    let correct = guess == matched.point.name && matched.distance <= tolerance;
    tracing::debug!(
        "Graded '{}' against '{}' at distance {:.4} (tolerance {}): {}",
        guess,
        matched.point.name,
        matched.distance,
        tolerance,
        if correct { "correct" } else { "incorrect" }
    );

    Verdict::Graded(GradeOutcome {
        correct,
        nearest: matched.point,
        guess: guess.to_string(),
        distance: matched.distance,
        tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;

    fn sample() -> Catalog {
        parse("P1,0.10,0.10\nP2,0.50,0.50\nP3,,")
    }

    #[test]
    fn test_nearest_picks_closest_authored_point() {
        let result = nearest(&sample(), Coordinate::new(0.12, 0.11)).unwrap();
        assert_eq!(result.point.name, "P1");
        assert!((result.distance - 0.0224).abs() < 1e-4);
    }

    #[test]
    fn test_points_without_coordinates_are_never_candidates() {
        let catalog = parse("P3,,\nP4,0.2,");
        assert!(nearest(&catalog, Coordinate::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_ties_resolve_to_catalog_order() {
        let catalog = parse("Beta,0.75,0.5\nAlpha,0.25,0.5");
        let result = nearest(&catalog, Coordinate::new(0.5, 0.5)).unwrap();
        assert_eq!(result.point.name, "Alpha");

        let catalog = parse("Helix,0.75,0.5\nhelix,0.25,0.5");
        let result = nearest(&catalog, Coordinate::new(0.5, 0.5)).unwrap();
        assert_eq!(result.point.name, "Helix");
    }

    #[test]
    fn test_grade_boundary_is_inclusive() {
        let catalog = parse("Tragus,0.0,0.0");

        let at_edge = grade(&catalog, Some(Coordinate::new(0.04, 0.0)), "Tragus", DEFAULT_TOLERANCE);
        assert!(at_edge.is_correct());

        let past_edge = grade(&catalog, Some(Coordinate::new(0.0401, 0.0)), "Tragus", DEFAULT_TOLERANCE);
        assert!(!past_edge.is_correct());
        assert!(matches!(past_edge, Verdict::Graded(_)));
    }

    #[test]
    fn test_name_mismatch_fails_even_when_close() {
        let verdict = grade(&sample(), Some(Coordinate::new(0.101, 0.1)), "P2", DEFAULT_TOLERANCE);
        match verdict {
            Verdict::Graded(outcome) => {
                assert!(!outcome.correct);
                assert_eq!(outcome.nearest.name, "P1");
                assert_eq!(outcome.guess, "P2");
                assert!(outcome.distance <= DEFAULT_TOLERANCE);
            }
            other => panic!("expected graded verdict, got {:?}", other),
        }
    }

    #[test]
    fn test_correct_name_far_away_fails() {
        let verdict = grade(&sample(), Some(Coordinate::new(0.3, 0.3)), "P1", DEFAULT_TOLERANCE);
        assert!(!verdict.is_correct());
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        let verdict = grade(&sample(), Some(Coordinate::new(0.1, 0.1)), "p1", DEFAULT_TOLERANCE);
        assert!(!verdict.is_correct());
    }

    #[test]
    fn test_tolerance_is_per_call() {
        let query = Some(Coordinate::new(0.2, 0.1));
        assert!(!grade(&sample(), query, "P1", DEFAULT_TOLERANCE).is_correct());
        assert!(grade(&sample(), query, "P1", 0.15).is_correct());
    }

    #[test]
    fn test_grade_signals() {
        assert_eq!(grade(&sample(), None, "P1", DEFAULT_TOLERANCE), Verdict::NoQuery);

        let unauthored = parse("P3,,");
        assert_eq!(
            grade(&unauthored, Some(Coordinate::new(0.5, 0.5)), "P3", DEFAULT_TOLERANCE),
            Verdict::NoReferenceData
        );
    }
}
