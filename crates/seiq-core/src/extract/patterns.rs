//! Regex patterns for page field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Invoice number: "№" followed by digits, optional hyphenated suffix.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"№\s*(\d+(?:-\d+)?)"
    ).unwrap();

    /// Line addressed with the 御中 honorific; the counterparty name lives here.
    pub static ref HONORIFIC_LINE: Regex = Regex::new(
        r"([^\n]+?)\s*御中"
    ).unwrap();

    /// Postal mark plus the code that follows it.
    pub static ref POSTAL_PREFIX: Regex = Regex::new(
        r"〒\s*\d{3}[-ー]?\d{4}\s*"
    ).unwrap();

    /// First prefecture/region character and everything after it.
    pub static ref REGION_TAIL: Regex = Regex::new(
        r"(?s)[都道府県].*"
    ).unwrap();

    /// Closing date marker: 2025年6月30日締切分.
    pub static ref CLOSE_DATE: Regex = Regex::new(
        r"(\d{4})年(\d{1,2})月(\d{1,2})日締切分"
    ).unwrap();
}
