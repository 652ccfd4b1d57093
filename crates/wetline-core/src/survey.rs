//! Station-elevation survey text, one point per line.
//!
//! Fields may be separated by whitespace, commas or tabs; anything after the second field is
//! ignored. Points come back sorted by station.

use crate::geom::{SectionPoint, section_point};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: expected `<station> <elevation>`, got {content:?}")]
pub struct SurveyError {
    pub line: usize,
    pub content: String,
}

fn parse_line(line: &str) -> Option<SectionPoint> {
    let mut fields = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|f| !f.is_empty());
    let station = fields.next()?.parse::<f64>().ok()?;
    let elevation = fields.next()?.parse::<f64>().ok()?;
    (station.is_finite() && elevation.is_finite()).then(|| section_point(station, elevation))
}

fn sorted(mut points: Vec<SectionPoint>) -> Vec<SectionPoint> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

/// Lenient parse: unreadable lines are skipped.
pub fn parse_station_elevation(text: &str) -> Vec<SectionPoint> {
    sorted(text.lines().filter_map(parse_line).collect())
}

/// Strict parse: blank lines are skipped, any other unreadable line is an error.
pub fn parse_station_elevation_strict(text: &str) -> Result<Vec<SectionPoint>, SurveyError> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(p) = parse_line(line) else {
            return Err(SurveyError {
                line: i + 1,
                content: line.to_string(),
            });
        };
        points.push(p);
    }
    Ok(sorted(points))
}
