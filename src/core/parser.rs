//! Tolerant reader for `label,x,y` point catalogs.
//!
//! Malformed rows never fail the parse: rows without a label are dropped and
//! coordinates that do not parse are left absent. Only undecodable bytes are
//! an error, and that is raised by [`parse_bytes`].

use crate::domain::model::{Catalog, Point};
use crate::utils::error::{QuizError, Result};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const HEADER_LABELS: &[&str] = &[
    "body part",
    "bodypart",
    "body_part",
    "structure",
    "name",
    "label",
];

const FIELD_COUNT: usize = 3;
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses catalog text into points sorted case-insensitively by name.
pub fn parse(text: &str) -> Catalog {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(&normalized);

    if normalized.is_empty() {
        return Catalog::default();
    }

    let lines: Vec<&str> = normalized.split('\n').collect();
    let skip = usize::from(lines.first().is_some_and(|line| is_header(line)));
    if skip == 1 {
        tracing::debug!("Header row detected: {}", lines[0].trim());
    }

    let mut points: Vec<Point> = lines
        .iter()
        .enumerate()
        .skip(skip)
        .filter_map(|(index, line)| parse_row(index + 1, line))
        .collect();

    points.sort_by_cached_key(|p| collation_key(&p.name));

    tracing::debug!("Parsed {} points from {} lines", points.len(), lines.len());
    Catalog::from_sorted(points)
}

/// Decodes `bytes` as UTF-8 and parses it. `source_id` only labels errors.
pub fn parse_bytes(source_id: &str, bytes: Vec<u8>) -> Result<Catalog> {
    let text = String::from_utf8(bytes).map_err(|source| QuizError::Decode {
        source_id: source_id.to_string(),
        source,
    })?;
    Ok(parse(&text))
}

fn is_header(line: &str) -> bool {
    let first = line.split(',').next().map(clean_field).unwrap_or_default();
    let first = first.to_lowercase();
    HEADER_LABELS.contains(&first.as_str())
}

fn parse_row(line_number: usize, line: &str) -> Option<Point> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields: Vec<&str> = line.split(',').map(clean_field).collect();
    fields.resize(FIELD_COUNT, "");

    let label = fields[0];
    if label.is_empty() {
        tracing::debug!("Skipping line {}: missing label", line_number);
        return None;
    }

    Point::new(label, parse_coordinate(fields[1]), parse_coordinate(fields[2]))
}

/// Orders names the way a reader expects: case is ignored and accents only
/// break ties between otherwise equal base letters.
fn collation_key(name: &str) -> (String, String) {
    let lowered = name.to_lowercase();
    let base: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (base, lowered)
}

fn clean_field(field: &str) -> &str {
    let field = field.trim();
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.names()
    }

    #[test]
    fn test_header_row_is_skipped() {
        let catalog = parse("Structure,X,Y\nTragus,0.10,0.20");
        assert_eq!(catalog.len(), 1);
        let point = &catalog.points()[0];
        assert_eq!(point.name, "Tragus");
        assert_eq!(point.x, Some(0.10));
        assert_eq!(point.y, Some(0.20));
    }

    #[test]
    fn test_first_row_without_header_is_data() {
        let catalog = parse("Tragus,0.10,0.20");
        assert_eq!(names(&catalog), vec!["Tragus"]);
        assert_eq!(catalog.points()[0].y, Some(0.20));
    }

    #[test]
    fn test_all_header_labels_recognized() {
        for label in ["Body Part", "BODYPART", "body_part", "Name", "label", "\"Structure\""] {
            let text = format!("{},x,y\nHelix,0.3,0.4", label);
            assert_eq!(names(&parse(&text)), vec!["Helix"], "header {}", label);
        }
    }

    #[test]
    fn test_malformed_rows_are_tolerated() {
        let catalog = parse("A,0.1,0.2\n,0.3,0.4\nB,notanumber,0.5");
        assert_eq!(names(&catalog), vec!["A", "B"]);

        let a = catalog.get("A").unwrap();
        assert_eq!((a.x, a.y), (Some(0.1), Some(0.2)));

        let b = catalog.get("B").unwrap();
        assert_eq!(b.x, None);
        assert_eq!(b.y, Some(0.5));
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let catalog = parse("Zeta,,\nalpha,,");
        assert_eq!(names(&catalog), vec!["alpha", "Zeta"]);
    }

    #[test]
    fn test_sort_places_accented_names_with_base_letter() {
        let catalog = parse("Zeta,,\nÉminence,,\nalpha,,");
        assert_eq!(names(&catalog), vec!["alpha", "Éminence", "Zeta"]);

        let catalog = parse("résumé,,\nResume,,\nrest,,");
        assert_eq!(names(&catalog), vec!["rest", "Resume", "résumé"]);
    }

    #[test]
    fn test_line_endings_and_bom() {
        let catalog = parse("\u{feff}name,x,y\r\nConcha,0.5,0.5\rLobule,0.4,0.9\r\n");
        assert_eq!(names(&catalog), vec!["Concha", "Lobule"]);
    }

    #[test]
    fn test_comments_blank_lines_and_quotes() {
        let text = "# authored 2024\n\n  \"Antihelix\" , \"0.35\" ,0.4  \n#Helix,0.1,0.1\n";
        let catalog = parse(text);
        assert_eq!(names(&catalog), vec!["Antihelix"]);
        assert_eq!(catalog.points()[0].x, Some(0.35));
        assert_eq!(catalog.points()[0].y, Some(0.4));
    }

    #[test]
    fn test_short_and_long_rows() {
        let catalog = parse("Crus\nScapha,0.2,0.3,extra,columns");
        let crus = catalog.get("Crus").unwrap();
        assert_eq!((crus.x, crus.y), (None, None));
        let scapha = catalog.get("Scapha").unwrap();
        assert_eq!((scapha.x, scapha.y), (Some(0.2), Some(0.3)));
    }

    #[test]
    fn test_lone_quote_is_kept() {
        let catalog = parse("\",0.1,0.1");
        assert_eq!(names(&catalog), vec!["\""]);
    }

    #[test]
    fn test_non_finite_coordinates_are_absent() {
        let catalog = parse("Tragus,NaN,inf");
        let point = &catalog.points()[0];
        assert_eq!((point.x, point.y), (None, None));
    }

    #[test]
    fn test_empty_input_yields_empty_catalog() {
        assert!(parse("").is_empty());
        assert!(parse("\u{feff}").is_empty());
        assert!(parse("label,x,y\n").is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "label,x,y\nhelix,0.1,0.2\nAntitragus,0.3,\nconcha,0.5,0.6";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes("broken.csv", vec![0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, QuizError::Decode { .. }));

        let catalog = parse_bytes("ok.csv", b"Helix,0.1,0.1".to_vec()).unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
