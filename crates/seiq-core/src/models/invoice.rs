//! Page records and invoice groups - the units the segmenter works with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Facts extracted from one physical page.
///
/// A record only exists for pages that carry an invoice number; pages
/// without one never reach the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based page number in the source document.
    pub page_number: u32,

    /// Invoice number as printed, possibly with a hyphenated suffix ("1024-2").
    pub invoice_number: String,

    /// Counterparty name, `不明` when no honorific line was found.
    pub company: String,

    /// Closing date, when the page carries a 締切分 marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,

    /// Page carries a （控）/(控) marker.
    pub is_copy: bool,

    /// Page carries the no-activity phrase.
    pub no_activity: bool,

    /// Stripped text is shorter than the near-blank threshold.
    pub near_blank: bool,
}

impl PageRecord {
    /// Invoice number with any hyphenated suffix stripped; the grouping key.
    pub fn base_number(&self) -> &str {
        self.invoice_number
            .split('-')
            .next()
            .unwrap_or(&self.invoice_number)
    }

    /// True when classification excludes this page from every group.
    pub fn is_discarded(&self) -> bool {
        self.is_copy || self.no_activity || self.near_blank
    }
}

/// One output document: consecutive non-discarded pages sharing a base
/// invoice number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceGroup {
    /// Invoice number with any hyphenated suffix stripped.
    pub base_number: String,

    /// Counterparty name from the group's first contributing page.
    pub company: String,

    /// Contributing 1-based page numbers, strictly increasing.
    pub pages: Vec<u32>,

    /// Closing date from the group's first contributing page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
}

impl InvoiceGroup {
    /// Open a new group seeded from a page record.
    pub fn from_record(record: &PageRecord) -> Self {
        Self {
            base_number: record.base_number().to_string(),
            company: record.company.clone(),
            pages: vec![record.page_number],
            close_date: record.close_date,
        }
    }
}
