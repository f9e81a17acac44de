//! Counterparty name extraction.

use super::patterns::{HONORIFIC_LINE, POSTAL_PREFIX, REGION_TAIL};
use crate::models::config::UNKNOWN_COMPANY;

/// Extract the counterparty name from page text.
///
/// The name is taken from the line addressed with the 御中 honorific, with
/// any postal-code prefix removed and everything from the first
/// prefecture/region character onward dropped; the last remaining line is
/// the name. Falls back to 不明 when no honorific line exists.
pub fn extract_company_name(text: &str) -> String {
    let Some(caps) = HONORIFIC_LINE.captures(text) else {
        return UNKNOWN_COMPANY.to_string();
    };

    let raw = caps[1].trim();
    let without_postal = POSTAL_PREFIX.replace_all(raw, "");
    let without_region = REGION_TAIL.replace(&without_postal, "");

    let name = without_region.lines().last().unwrap_or("").trim();
    if name.is_empty() {
        UNKNOWN_COMPANY.to_string()
    } else {
        name.to_string()
    }
}
