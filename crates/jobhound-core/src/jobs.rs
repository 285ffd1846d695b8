//! Job posting records as returned by the scraping collaborator.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Export/display column order.
pub const JOB_FIELDS: [&str; 6] = [
    "title",
    "company",
    "location",
    "date_posted",
    "job_url",
    "job_url_direct",
];

/// A single job posting projected to the six fields the bot uses.
///
/// Every field is optional: sources routinely omit some of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Posting title
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Hiring company
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    /// Job location as reported by the source
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    /// Posting date, usually `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_posted: Option<String>,
    /// Listing URL on the source site
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_url: Option<String>,
    /// Direct URL on the employer's site
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_url_direct: Option<String>,
}

impl JobRecord {
    /// Title or `"No Title"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("No Title")
    }

    /// Company or `"Unknown Company"`.
    #[must_use]
    pub fn display_company(&self) -> &str {
        non_blank(self.company.as_deref()).unwrap_or("Unknown Company")
    }

    /// Location or `"Unknown Location"`.
    #[must_use]
    pub fn display_location(&self) -> &str {
        non_blank(self.location.as_deref()).unwrap_or("Unknown Location")
    }

    /// Posting date or `"Unknown Date"`.
    #[must_use]
    pub fn display_date(&self) -> &str {
        non_blank(self.date_posted.as_deref()).unwrap_or("Unknown Date")
    }

    /// Listing URL or `"#"`.
    #[must_use]
    pub fn display_url(&self) -> &str {
        non_blank(self.job_url.as_deref()).unwrap_or("#")
    }

    /// Field values in [`JOB_FIELDS`] order.
    #[must_use]
    pub fn fields(&self) -> [Option<&str>; 6] {
        [
            self.title.as_deref(),
            self.company.as_deref(),
            self.location.as_deref(),
            self.date_posted.as_deref(),
            self.job_url.as_deref(),
            self.job_url_direct.as_deref(),
        ]
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept strings, numbers and booleans; treat `null` (and `NaN` markers) as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if s != "NaN" && s != "nan" => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_placeholders() {
        let record = JobRecord::default();
        assert_eq!(record.display_title(), "No Title");
        assert_eq!(record.display_company(), "Unknown Company");
        assert_eq!(record.display_location(), "Unknown Location");
        assert_eq!(record.display_date(), "Unknown Date");
        assert_eq!(record.display_url(), "#");
    }

    #[test]
    fn test_blank_fields_use_placeholders() {
        let record = JobRecord {
            title: Some("   ".to_string()),
            job_url: Some(String::new()),
            ..JobRecord::default()
        };
        assert_eq!(record.display_title(), "No Title");
        assert_eq!(record.display_url(), "#");
    }

    #[test]
    fn test_lenient_deserialization() -> Result<(), serde_json::Error> {
        let record: JobRecord = serde_json::from_str(
            r#"{
                "title": "Counsel",
                "company": null,
                "location": 10115,
                "date_posted": "2025-03-01",
                "job_url": "https://example.com/1",
                "salary": 90000,
                "is_remote": true
            }"#,
        )?;

        assert_eq!(record.title.as_deref(), Some("Counsel"));
        assert_eq!(record.company, None);
        assert_eq!(record.location.as_deref(), Some("10115"));
        assert_eq!(record.date_posted.as_deref(), Some("2025-03-01"));
        assert_eq!(record.job_url_direct, None);
        Ok(())
    }

    #[test]
    fn test_fields_follow_column_order() {
        let record = JobRecord {
            title: Some("t".to_string()),
            job_url_direct: Some("d".to_string()),
            ..JobRecord::default()
        };
        let fields = record.fields();
        assert_eq!(fields[0], Some("t"));
        assert_eq!(fields[5], Some("d"));
        assert!(fields[1..5].iter().all(Option::is_none));
    }
}
