use crate::domain::model::{Attendee, Venue};
use crate::utils::error::{Result, SummitError};
use crate::utils::validation::validate_unique_names;
use std::collections::BTreeSet;
use std::io::Read;

/// Parses attendee preferences from CSV:
///
/// ```text
/// attendee name, venue A name, venue B name
/// jack, yes, yes
/// gill, yes, no
/// ```
///
/// The first non-blank row is the header. Cells are trimmed and blank rows skipped. A row
/// with no preference cells filled in means the attendee has no preference.
pub fn parse_attendees<R: Read>(reader: R) -> Result<Vec<Attendee>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut venue_names: Vec<String> = Vec::new();
    let mut seen_header = false;
    let mut attendees = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |pos| pos.line() as usize);

        if !seen_header {
            venue_names = record.iter().skip(1).map(str::to_string).collect();
            seen_header = true;
            continue;
        }

        let name = record.get(0).unwrap_or_default();
        let cells: Vec<&str> = record.iter().skip(1).collect();

        let mut preferences = BTreeSet::new();
        if cells.iter().any(|cell| !cell.is_empty()) {
            if cells.len() != venue_names.len() {
                return Err(SummitError::RowCountMismatch {
                    line,
                    expected: venue_names.len(),
                    found: cells.len(),
                });
            }

            for (cell, venue_name) in cells.iter().zip(&venue_names) {
                if is_yes(cell, line)? {
                    preferences.insert(venue_name.clone());
                }
            }
        }

        attendees.push(Attendee::new(name, preferences));
    }

    tracing::debug!(attendees = attendees.len(), "parsed attendee preferences");
    Ok(attendees)
}

fn is_yes(value: &str, line: usize) -> Result<bool> {
    let value = value.to_lowercase();
    if value.starts_with("yes") {
        return Ok(true);
    }
    if value.starts_with("no") {
        return Ok(false);
    }
    Err(SummitError::UnrecognisedPreference { line, value })
}

/// Parses `name:capacity` specs. The split is on the last `:`, so names may contain colons.
pub fn parse_venues<S: AsRef<str>>(raw_venues: &[S]) -> Result<Vec<Venue>> {
    let venues = raw_venues
        .iter()
        .map(|raw| parse_venue(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    validate_unique_names(venues.iter().map(Venue::name))?;
    Ok(venues)
}

fn parse_venue(raw: &str) -> Result<Venue> {
    let invalid = |reason: &str| SummitError::InvalidVenueSpec {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };

    let (name, capacity) = raw
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected name:capacity"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("venue name cannot be empty"));
    }

    let capacity: usize = capacity
        .trim()
        .parse()
        .map_err(|_| invalid("capacity must be an int"))?;
    if capacity == 0 {
        return Err(invalid("capacity must be positive"));
    }

    Ok(Venue::new(name, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line(line: &str) -> Result<Vec<Attendee>> {
        let data = format!("name,a,  b  ,c\n{}\n", line);
        parse_attendees(data.as_bytes())
    }

    fn prefs(attendee: &Attendee) -> Vec<&str> {
        attendee.preferences().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_trim_whitespace() {
        let attendees = parse_line("1,  yes,yes  ,  Yes").unwrap();
        assert_eq!(attendees[0].name(), "1");
        assert_eq!(prefs(&attendees[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extra_text_and_case() {
        let attendees = parse_line("2,yes,yes please,No").unwrap();
        assert_eq!(prefs(&attendees[0]), vec!["a", "b"]);

        let attendees = parse_line("2,YES,Yes,No").unwrap();
        assert_eq!(prefs(&attendees[0]), vec!["a", "b"]);
    }

    #[test]
    fn test_no_preferences() {
        let attendees = parse_line("4").unwrap();
        assert_eq!(attendees.len(), 1);
        assert!(attendees[0].preferences().is_empty());
        assert!(attendees[0].accepts("c"));

        let attendees = parse_line("4,,,").unwrap();
        assert!(attendees[0].preferences().is_empty());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        assert!(parse_line("").unwrap().is_empty());
        assert!(parse_line(",,,,").unwrap().is_empty());
    }

    #[test]
    fn test_not_yes_or_no() {
        let err = parse_attendees("name,a,b\n1,yes,hello\n".as_bytes()).unwrap_err();
        match err {
            SummitError::UnrecognisedPreference { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "hello");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_count() {
        let err = parse_attendees("name,a,b\n2,yes,yes,no\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SummitError::RowCountMismatch { expected: 2, found: 3, .. }
        ));
    }

    #[test]
    fn test_get_venues() {
        let venues = parse_venues(&["v1:3", "v2:5", "venue 3:1", "venue: great:8"]).unwrap();

        let names: Vec<&str> = venues.iter().map(Venue::name).collect();
        let capacities: Vec<usize> = venues.iter().map(Venue::capacity).collect();
        assert_eq!(names, vec!["v1", "v2", "venue 3", "venue: great"]);
        assert_eq!(capacities, vec![3, 5, 1, 8]);
    }

    #[test]
    fn test_bad_venues() {
        assert!(matches!(
            parse_venues(&["hall:many"]),
            Err(SummitError::InvalidVenueSpec { .. })
        ));
        assert!(matches!(
            parse_venues(&["hall"]),
            Err(SummitError::InvalidVenueSpec { .. })
        ));
        assert!(matches!(
            parse_venues(&["hall:0"]),
            Err(SummitError::InvalidVenueSpec { .. })
        ));
        assert!(matches!(
            parse_venues(&["hall:2", "hall:3"]),
            Err(SummitError::DuplicateVenue { .. })
        ));
    }
}
