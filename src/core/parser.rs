// HighlightWizard - core/parser.rs
//
// Line-oriented event log parsing.
// Core layer: accepts BufRead trait objects, never touches filesystem directly.
//
// Data line format: `<minute>,<category>,<description>`. The description is
// everything after the second separator, so it may contain commas.

use crate::core::model::{CategoryWarning, EventCategory, EventRecord, LoadSummary};
use crate::util::constants::{COMMENT_PREFIX, FIELD_SEPARATOR, MIN_FIELDS};
use crate::util::error::{LineError, LoadError};
use std::io::{BufRead, Cursor};
use std::num::IntErrorKind;

/// A data line that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub record: EventRecord,
    /// Set when the category text was not recognised and became `Other`.
    pub warning: Option<CategoryWarning>,
}

/// Result of parsing a whole source.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Records in source order.
    pub records: Vec<EventRecord>,
    /// Statistics and non-fatal warnings.
    pub summary: LoadSummary,
}

/// Whether a line carries no data (empty or a `#` comment).
pub fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}

/// Parse one data line.
///
/// The caller has already skipped comments and empty lines. Errors carry no
/// source context; `parse_reader` adds the line number and source name.
pub fn parse_line(line: &str, line_number: u64) -> Result<ParsedLine, LineError> {
    let fields: Vec<&str> = line.splitn(MIN_FIELDS, FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELDS {
        return Err(LineError::TooFewFields {
            found: fields.len(),
            line: line.to_string(),
        });
    }

    let timestamp_minutes = parse_minute(fields[0])?;

    let raw_category = fields[1];
    let mut category = EventCategory::from_label(raw_category);
    let mut warning = None;
    if category == EventCategory::Unknown {
        let coerced = CategoryWarning {
            line_number,
            raw_category: raw_category.to_string(),
        };
        tracing::warn!(line = line_number, "{coerced}");
        category = EventCategory::Other;
        warning = Some(coerced);
    }

    // splitn leaves the third piece untouched, so embedded separators in the
    // description survive as-is. Only U+0020 is trimmed.
    let description = fields[2].trim_matches(' ').to_string();

    Ok(ParsedLine {
        record: EventRecord {
            timestamp_minutes,
            category,
            description,
            line_number,
        },
        warning,
    })
}

/// Parse the timestamp field into a non-negative match minute.
fn parse_minute(raw: &str) -> Result<u32, LineError> {
    let text = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    match text.parse::<i64>() {
        Ok(value) if value < 0 => Err(LineError::OutOfRange {
            value: raw.to_string(),
        }),
        Ok(value) => u32::try_from(value).map_err(|_| LineError::OutOfRange {
            value: raw.to_string(),
        }),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(LineError::OutOfRange {
                    value: raw.to_string(),
                })
            }
            _ => Err(LineError::InvalidNumber {
                value: raw.to_string(),
            }),
        },
    }
}

/// Parse every line of `reader`.
///
/// Aborts on the first malformed line or read error; nothing parsed before
/// the failure is returned.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    source_name: &str,
) -> Result<ParseResult, LoadError> {
    tracing::debug!(source = source_name, "Parsing started");

    let mut result = ParseResult::default();
    result.summary.source_name = source_name.to_string();

    let mut buf = Vec::new();
    let mut line_number: u64 = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| LoadError::Io {
                source_name: source_name.to_string(),
                operation: "read",
                source: e,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;
        let line = decode_line(&buf);
        result.summary.lines_read += 1;

        if is_skippable(&line) {
            result.summary.lines_skipped += 1;
            continue;
        }

        let parsed = parse_line(&line, line_number).map_err(|cause| LoadError::Format {
            source_name: source_name.to_string(),
            line_number,
            cause,
        })?;

        *result
            .summary
            .records_by_category
            .entry(parsed.record.category)
            .or_insert(0) += 1;
        if let Some(warning) = parsed.warning {
            result.summary.warnings.push(warning);
        }
        result.records.push(parsed.record);
    }

    result.summary.records = result.records.len();

    tracing::debug!(
        source = source_name,
        lines = result.summary.lines_read,
        records = result.summary.records,
        warnings = result.summary.warnings.len(),
        "Parsing finished"
    );

    Ok(result)
}

/// Strip the line terminator and decode, replacing invalid UTF-8 (e.g. a
/// Latin-1 encoded name) with U+FFFD rather than rejecting the line.
fn decode_line(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Parse an in-memory event log.
pub fn parse_content(content: &str, source_name: &str) -> Result<ParseResult, LoadError> {
    parse_reader(Cursor::new(content), source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> ParsedLine {
        parse_line(line, 1).expect("line should parse")
    }

    #[test]
    fn test_parse_basic_line() {
        let parsed = parse_ok("12,GOAL,Header from corner");
        assert_eq!(parsed.record.timestamp_minutes, 12);
        assert_eq!(parsed.record.category, EventCategory::Goal);
        assert_eq!(parsed.record.description, "Header from corner");
        assert!(parsed.warning.is_none());
    }

    #[test]
    fn test_description_keeps_embedded_commas() {
        let parsed = parse_ok("23,GOAL,  Amazing strike, top corner  ");
        assert_eq!(parsed.record.description, "Amazing strike, top corner");
        assert_eq!(parsed.record.category, EventCategory::Goal);
    }

    #[test]
    fn test_description_trims_only_spaces() {
        let parsed = parse_ok("5,FOUL,\tTrip on the wing\t");
        assert_eq!(parsed.record.description, "\tTrip on the wing\t");
    }

    #[test]
    fn test_empty_description_allowed() {
        assert_eq!(parse_ok("45,HALF_TIME,").record.description, "");
        assert_eq!(parse_ok("45,HALF_TIME,    ").record.description, "");
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_line("12,GOAL", 4).unwrap_err();
        assert_eq!(
            err,
            LineError::TooFewFields {
                found: 2,
                line: "12,GOAL".to_string()
            }
        );
        let err = parse_line("just text", 4).unwrap_err();
        assert!(matches!(err, LineError::TooFewFields { found: 1, .. }));
    }

    #[test]
    fn test_non_numeric_timestamp() {
        let err = parse_line("abc,GOAL,Great shot", 1).unwrap_err();
        assert_eq!(
            err,
            LineError::InvalidNumber {
                value: "abc".to_string()
            }
        );
        assert!(matches!(
            parse_line(",GOAL,Great shot", 1),
            Err(LineError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_line("12a,GOAL,Great shot", 1),
            Err(LineError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_negative_timestamp_out_of_range() {
        let err = parse_line("-5,GOAL,Great shot", 1).unwrap_err();
        assert_eq!(
            err,
            LineError::OutOfRange {
                value: "-5".to_string()
            }
        );
    }

    #[test]
    fn test_huge_timestamp_out_of_range() {
        assert!(matches!(
            parse_line("99999999999,GOAL,x", 1),
            Err(LineError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_line("999999999999999999999999,GOAL,x", 1),
            Err(LineError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_timestamp_tolerates_surrounding_spaces() {
        assert_eq!(parse_ok(" 7 ,FOUL,Shirt pull").record.timestamp_minutes, 7);
    }

    #[test]
    fn test_unknown_category_becomes_other_with_warning() {
        let parsed = parse_line("10,PENALTY,Spot kick awarded", 9).unwrap();
        assert_eq!(parsed.record.category, EventCategory::Other);
        assert_eq!(parsed.record.description, "Spot kick awarded");
        assert_eq!(
            parsed.warning,
            Some(CategoryWarning {
                line_number: 9,
                raw_category: "PENALTY".to_string()
            })
        );
    }

    #[test]
    fn test_parse_content_skips_comments_and_empty_lines() {
        let content = "# kickoff\n\
                       0,GAME_START,Match begins\n\
                       \n\
                       #12,GOAL,commented out\n\
                       12,goal,Header from corner\n";
        let result = parse_content(content, "test.log").unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].line_number, 2);
        assert_eq!(result.records[1].line_number, 5);
        assert_eq!(result.summary.lines_read, 5);
        assert_eq!(result.summary.lines_skipped, 3);
        assert_eq!(result.summary.records, 2);
        assert_eq!(
            result.summary.records_by_category.get(&EventCategory::Goal),
            Some(&1)
        );
    }

    #[test]
    fn test_parse_content_handles_crlf() {
        let content = "0,GAME_START,Match begins\r\n90,FULL_TIME,End of match\r\n";
        let result = parse_content(content, "crlf.log").unwrap();
        assert_eq!(result.records[1].description, "End of match");
    }

    #[test]
    fn test_parse_content_aborts_with_line_number() {
        let content = "0,GAME_START,Match begins\n\
                       # comment\n\
                       12,GOAL\n\
                       20,FOUL,never reached\n";
        let err = parse_content(content, "bad.log").unwrap_err();
        match err {
            LoadError::Format {
                source_name,
                line_number,
                cause,
            } => {
                assert_eq!(source_name, "bad.log");
                assert_eq!(line_number, 3);
                assert!(matches!(cause, LineError::TooFewFields { found: 2, .. }));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_content() {
        let result = parse_content("", "empty.log").unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.summary.lines_read, 0);
    }

    #[test]
    fn test_latin1_description_loads() {
        let bytes: &[u8] = b"0,GAME_START,ok\n\
                             1,GOAL,Header by M\xfcller\r\n\
                             2,FOUL,caf\xe9";
        let result = parse_reader(bytes, "latin1.log").unwrap();
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.records[1].category, EventCategory::Goal);
        assert_eq!(result.records[1].description, "Header by M\u{FFFD}ller");
        assert_eq!(result.records[2].description, "caf\u{FFFD}");
        assert_eq!(result.records[2].line_number, 3);
    }

    #[test]
    fn test_timestamp_tolerates_leading_tab() {
        let parsed = parse_ok("\t12,GOAL,x");
        assert_eq!(parsed.record.timestamp_minutes, 12);
        assert!(matches!(
            parse_line("\t12abc,GOAL,x", 1),
            Err(LineError::InvalidNumber { .. })
        ));
    }
}
