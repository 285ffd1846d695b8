//! Search UI components
//!
//! Contains the user-facing texts, the HTML page renderer and the
//! navigation keyboard.

use html_escape::{encode_double_quoted_attribute, encode_text};
use jobhound_core::jobs::JobRecord;
use jobhound_core::pagination::PageView;
use jobhound_core::search::SearchRequest;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// ─────────────────────────────────────────────────────────────────────────────
// Button labels
// ─────────────────────────────────────────────────────────────────────────────

/// Label of the "previous page" button
pub const PREV_BUTTON_LABEL: &str = "⬅️ Previous";
/// Label of the "next page" button
pub const NEXT_BUTTON_LABEL: &str = "Next ➡️";

// ─────────────────────────────────────────────────────────────────────────────
// Trait definition
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for search UI view rendering
///
/// Provides all plain-text messages of the search flow. Page bodies are
/// rendered separately by [`render_page_html`].
pub trait SearchView {
    /// Greeting sent on `/start`
    fn welcome_message() -> &'static str;

    /// Usage text sent on `/help`
    fn help_message() -> &'static str;

    /// Notice shown while a search runs
    fn processing_message(request: &SearchRequest) -> String;

    /// Replacement text for the notice when nothing was found
    fn no_results_message() -> &'static str;

    /// Format an error reply
    fn error_message(error: &str) -> String;

    /// Caption of the CSV attachment
    fn export_caption() -> &'static str;
}

// ─────────────────────────────────────────────────────────────────────────────
// Default implementation
// ─────────────────────────────────────────────────────────────────────────────

/// Default English-language implementation of `SearchView`
pub struct DefaultSearchView;

impl SearchView for DefaultSearchView {
    fn welcome_message() -> &'static str {
        "👋 Welcome to JobsBot!\n\n\
         🔍 Send me a job search query in the format:\n\
         <search_term>, <location>\n\n\
         Example: \"legal counsel, Berlin\"\n\n\
         I'll find recent job listings and send you a CSV file!"
    }

    fn help_message() -> &'static str {
        "🔍 Send me a job search query in the format:\n\
         <search_term>, <location>\n\n\
         Example: \"legal counsel, Berlin\"\n\n\
         Results come 5 per page with ⬅️/➡️ buttons, plus a CSV file with every listing."
    }

    fn processing_message(request: &SearchRequest) -> String {
        format!(
            "🔍 Searching for '{}' positions in {}...\nThis may take a minute ⏳",
            request.search_term(),
            request.location()
        )
    }

    fn no_results_message() -> &'static str {
        "❌ No jobs found matching your criteria."
    }

    fn error_message(error: &str) -> String {
        format!("⚠️ Error: {error}")
    }

    fn export_caption() -> &'static str {
        "📄 Download all job listings in CSV format."
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render one page of results as Telegram HTML.
///
/// Every piece of user or scraper text is escaped.
#[must_use]
pub fn render_page_html(view: &PageView<'_>) -> String {
    let header = format!(
        "✅ <b>Job Results ({}/{})</b>\n🔍 <b>{}</b> in {}\n\n",
        view.display_page(),
        view.total_pages,
        encode_text(view.search_term),
        encode_text(view.location)
    );

    let blocks: Vec<String> = view.entries.iter().map(render_job_html).collect();
    header + &blocks.join("\n\n")
}

fn render_job_html(job: &JobRecord) -> String {
    format!(
        "📌 <b><a href=\"{}\">{}</a></b>\n🏢 {} | 📍 {} | 📅 {}",
        encode_double_quoted_attribute(job.display_url()),
        encode_text(job.display_title()),
        encode_text(job.display_company()),
        encode_text(job.display_location()),
        encode_text(job.display_date())
    )
}

/// Navigation keyboard for a page: one row with the buttons that apply,
/// or `None` on a single-page result.
#[must_use]
pub fn page_keyboard(view: &PageView<'_>) -> Option<InlineKeyboardMarkup> {
    let mut row = Vec::with_capacity(2);
    if let Some(prev) = view.prev {
        row.push(InlineKeyboardButton::callback(
            PREV_BUTTON_LABEL,
            prev.to_string(),
        ));
    }
    if let Some(next) = view.next {
        row.push(InlineKeyboardButton::callback(
            NEXT_BUTTON_LABEL,
            next.to_string(),
        ));
    }

    (!row.is_empty()).then(|| InlineKeyboardMarkup::new(vec![row]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobhound_core::pagination::{NavPayload, ResultSet};
    use jobhound_core::testing::{numbered_records, request};
    use teloxide::types::InlineKeyboardButtonKind;

    fn result_set(records: Vec<JobRecord>) -> ResultSet {
        let Some(set) = ResultSet::new(&request(), records) else {
            panic!("expected a non-empty result set");
        };
        set
    }

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<(String, String)> {
        markup.inline_keyboard[0]
            .iter()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => (button.text.clone(), data.clone()),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_first_page_header_and_blocks() {
        let set = result_set(numbered_records(12));
        let html = render_page_html(&set.current_view());

        assert!(html.starts_with(
            "✅ <b>Job Results (1/3)</b>\n🔍 <b>legal counsel</b> in Berlin\n\n📌 "
        ));
        assert!(html.contains(
            "📌 <b><a href=\"https://example.com/jobs/1\">Job 1</a></b>\n🏢 Company 1 | 📍 Berlin | 📅 2025-03-01"
        ));
        assert_eq!(html.matches("📌").count(), 5);
        assert!(!html.contains("Job 6<"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let set = result_set(vec![JobRecord::default()]);
        let html = render_page_html(&set.current_view());

        assert!(html.contains(
            "📌 <b><a href=\"#\">No Title</a></b>\n🏢 Unknown Company | 📍 Unknown Location | 📅 Unknown Date"
        ));
    }

    #[test]
    fn test_scraped_text_is_escaped() {
        let record = JobRecord {
            title: Some("C++ <Senior> & Lead".to_string()),
            company: Some("Smith & Sons".to_string()),
            job_url: Some("https://example.com/?a=1&b=\"2\"".to_string()),
            ..JobRecord::default()
        };
        let html = render_page_html(&result_set(vec![record]).current_view());

        assert!(html.contains("C++ &lt;Senior&gt; &amp; Lead"));
        assert!(html.contains("Smith &amp; Sons"));
        assert!(html.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_keyboard_follows_available_pages() {
        let mut set = result_set(numbered_records(12));

        let Some(first) = page_keyboard(&set.current_view()) else {
            panic!("first page needs a keyboard");
        };
        assert_eq!(
            callback_data(&first),
            vec![(NEXT_BUTTON_LABEL.to_string(), "next_1".to_string())]
        );

        let Some(middle) = set.page_view(1).as_ref().and_then(page_keyboard) else {
            panic!("middle page needs a keyboard");
        };
        assert_eq!(
            callback_data(&middle),
            vec![
                (PREV_BUTTON_LABEL.to_string(), "prev_0".to_string()),
                (NEXT_BUTTON_LABEL.to_string(), "next_2".to_string()),
            ]
        );

        assert_eq!(set.navigate(NavPayload::next(2)), Some(2));
        let Some(last) = page_keyboard(&set.current_view()) else {
            panic!("last page needs a keyboard");
        };
        assert_eq!(
            callback_data(&last),
            vec![(PREV_BUTTON_LABEL.to_string(), "prev_1".to_string())]
        );
    }

    #[test]
    fn test_single_page_has_no_keyboard() {
        let set = result_set(numbered_records(5));
        assert!(page_keyboard(&set.current_view()).is_none());
    }

    #[test]
    fn test_plain_texts() {
        assert_eq!(
            DefaultSearchView::processing_message(&request()),
            "🔍 Searching for 'legal counsel' positions in Berlin...\nThis may take a minute ⏳"
        );
        assert_eq!(
            DefaultSearchView::error_message("Please use the format: <search_term>, <location>"),
            "⚠️ Error: Please use the format: <search_term>, <location>"
        );
        assert!(DefaultSearchView::welcome_message().contains("<search_term>, <location>"));
    }
}
