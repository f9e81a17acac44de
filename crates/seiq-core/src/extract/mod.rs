//! Page field extraction: raw page text to a structured record.

pub mod company;
pub mod dates;
pub mod patterns;

pub use company::extract_company_name;
pub use dates::{date_from_short, extract_close_date, short_date_form};

use tracing::debug;

use crate::models::config::NEAR_BLANK_THRESHOLD;
use crate::models::invoice::PageRecord;

/// Copy markers, in full-width and half-width parenthesis form.
const COPY_MARKERS: [&str; 2] = ["（控）", "(控)"];

/// No-activity phrases. The shorter one is a prefix of the longer one; both
/// are checked because real documents may carry the short variant alone.
const NO_ACTIVITY_PHRASES: [&str; 2] = ["当月のお取引はございません", "当月のお取引"];

/// Parse one page's raw text into a [`PageRecord`].
///
/// Returns `None` when no invoice-number pattern is present anywhere in the
/// text; such pages are invisible to segmentation. Every other field is a
/// best effort: a missing counterparty becomes 不明, a missing closing date
/// stays `None`.
pub fn extract_page_record(page_number: u32, text: Option<&str>) -> Option<PageRecord> {
    let text = text?;

    let caps = patterns::INVOICE_NUMBER.captures(text)?;
    let invoice_number = caps[1].to_string();

    let is_copy = COPY_MARKERS.iter().any(|m| text.contains(m));
    let no_activity = NO_ACTIVITY_PHRASES.iter().any(|p| text.contains(p));
    let near_blank = text.trim().chars().count() < NEAR_BLANK_THRESHOLD;

    let company = extract_company_name(text);
    let close_date = extract_close_date(text);

    debug!(
        "page {}: № {} ({}) copy={} no_activity={} near_blank={}",
        page_number, invoice_number, company, is_copy, no_activity, near_blank
    );

    Some(PageRecord {
        page_number,
        invoice_number,
        company,
        close_date,
        is_copy,
        no_activity,
        near_blank,
    })
}
