//! CSV export of job records.
//!
//! Format: comma-delimited, header row with [`JOB_FIELDS`], `\n` line
//! endings, no index column. Present fields are quoted unless purely
//! numeric; `"` and `\` inside a quoted field are escaped with `\`.
//! Missing fields are written empty and unquoted.

use crate::jobs::{JobRecord, JOB_FIELDS};
use crate::search::SearchRequest;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// A CSV document ready to be sent as a file attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Attachment file name
    pub file_name: String,
    /// UTF-8 CSV bytes
    pub content: Vec<u8>,
}

impl ExportFile {
    /// Export `records` under the deterministic file name of `request`.
    #[must_use]
    pub fn for_search(request: &SearchRequest, records: &[JobRecord]) -> Self {
        Self {
            file_name: request.export_file_name(),
            content: to_csv(records).into_bytes(),
        }
    }
}

/// Serialize records to CSV text.
///
/// ```
/// use jobhound_core::export::to_csv;
/// use jobhound_core::jobs::JobRecord;
///
/// let record = JobRecord {
///     title: Some("Counsel \"Senior\"".to_string()),
///     ..JobRecord::default()
/// };
/// let csv = to_csv(&[record]);
/// assert_eq!(
///     csv,
///     "\"title\",\"company\",\"location\",\"date_posted\",\"job_url\",\"job_url_direct\"\n\
///      \"Counsel \\\"Senior\\\"\",,,,,\n"
/// );
/// ```
#[must_use]
pub fn to_csv(records: &[JobRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, JOB_FIELDS.iter().map(|f| Some(*f)));
    for record in records {
        write_row(&mut out, record.fields().into_iter());
    }
    out
}

fn write_row<'a>(out: &mut String, fields: impl Iterator<Item = Option<&'a str>>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        if let Some(value) = field {
            write_field(out, value);
        }
    }
    out.push('\n');
}

fn write_field(out: &mut String, value: &str) {
    if is_numeric(value) {
        out.push_str(value);
        return;
    }

    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && value.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Inverse of [`to_csv`] for the same quoting and escaping rules.
    fn parse_csv(input: &str) -> Vec<Vec<Option<String>>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            let field = if chars.peek() == Some(&QUOTE) {
                chars.next();
                let mut value = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        ESCAPE => value.extend(chars.next()),
                        QUOTE => break,
                        other => value.push(other),
                    }
                }
                Some(value)
            } else {
                let mut value = String::new();
                while let Some(&c) = chars.peek() {
                    if c == DELIMITER || c == '\n' {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
                (!value.is_empty()).then_some(value)
            };
            row.push(field);

            match chars.next() {
                Some(DELIMITER) => {}
                Some('\n') => {
                    rows.push(std::mem::take(&mut row));
                    if chars.peek().is_none() {
                        break;
                    }
                }
                _ => {
                    rows.push(std::mem::take(&mut row));
                    break;
                }
            }
        }
        rows
    }

    fn record(title: &str, company: Option<&str>) -> JobRecord {
        JobRecord {
            title: Some(title.to_string()),
            company: company.map(str::to_string),
            location: Some("Berlin, DE".to_string()),
            date_posted: Some("2025-03-01".to_string()),
            job_url: Some("https://example.com/jobs?id=1&ref=x".to_string()),
            job_url_direct: None,
        }
    }

    #[test]
    fn test_header_row() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            "\"title\",\"company\",\"location\",\"date_posted\",\"job_url\",\"job_url_direct\"\n"
        );
    }

    #[test]
    fn test_delimiters_and_quotes_inside_fields() {
        let csv = to_csv(&[record(r#"Lawyer "M/F", \ senior"#, Some("ACME"))]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""Lawyer \"M/F\", \\ senior","ACME","Berlin, DE","2025-03-01","https://example.com/jobs?id=1&ref=x","#
        );
    }

    #[test]
    fn test_numeric_fields_are_not_quoted() {
        let mut r = JobRecord::default();
        r.location = Some("10115".to_string());
        r.title = Some("3.5".to_string());
        r.company = Some("inf".to_string());
        let csv = to_csv(&[r]);
        assert!(csv.ends_with("3.5,\"inf\",10115,,,\n"), "unexpected: {csv}");
    }

    #[test]
    fn test_export_file_for_search() {
        let Ok(request) = SearchRequest::parse("legal counsel, Berlin") else {
            panic!("expected a valid request");
        };
        let file = ExportFile::for_search(&request, &[record("Counsel", None)]);
        assert_eq!(file.file_name, "jobs_legal_counsel_Berlin.csv");
        assert!(String::from_utf8_lossy(&file.content).contains("\"Counsel\""));
    }

    #[test]
    fn test_round_trip_with_missing_fields() {
        let records = vec![record("Counsel", None), record("Paralegal", Some("Firm \"X\""))];
        let rows = parse_csv(&to_csv(&records));

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            JOB_FIELDS.iter().map(|f| Some((*f).to_string())).collect::<Vec<_>>()
        );
        for (row, record) in rows[1..].iter().zip(&records) {
            let expected: Vec<Option<String>> =
                record.fields().iter().map(|f| f.map(str::to_string)).collect();
            assert_eq!(row, &expected);
        }
    }

    fn arb_field() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[ -~\n]{0,24}")
    }

    fn arb_record() -> impl Strategy<Value = JobRecord> {
        (
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
        )
            .prop_map(
                |(title, company, location, date_posted, job_url, job_url_direct)| JobRecord {
                    title,
                    company,
                    location,
                    date_posted,
                    job_url,
                    job_url_direct,
                },
            )
    }

    proptest! {
        #[test]
        fn export_round_trips_ascii(records in proptest::collection::vec(arb_record(), 0..12)) {
            let rows = parse_csv(&to_csv(&records));
            prop_assert_eq!(rows.len(), records.len() + 1);

            for (row, record) in rows[1..].iter().zip(&records) {
                // An empty present value is written quoted and reads back as Some("")
                let expected: Vec<Option<String>> =
                    record.fields().iter().map(|f| f.map(str::to_string)).collect();
                prop_assert_eq!(row, &expected);
            }
        }
    }
}
