//! Invoice segmentation: an ordered page-record sequence becomes an ordered
//! sequence of invoice groups.

use tracing::info;

use crate::models::invoice::{InvoiceGroup, PageRecord};

/// Group an ordered sequence of page records into invoice groups.
///
/// Single forward pass over the records with one piece of running state, the
/// currently open group. A record whose base number matches the open group
/// extends it; any other record closes the open group and opens a new one.
/// Records flagged copy / no-activity / near-blank are dropped without
/// closing the open group, so a discardable page between two pages of the
/// same base number does not break the group.
pub fn segment_pages(records: &[PageRecord]) -> Vec<InvoiceGroup> {
    let mut groups = Vec::new();
    let mut open: Option<InvoiceGroup> = None;

    for record in records {
        if record.is_copy {
            info!(
                "page {}: № {} ({}) [控え] skipped",
                record.page_number, record.invoice_number, record.company
            );
            continue;
        }
        if record.no_activity {
            info!(
                "page {}: № {} ({}) [当月取引なし] skipped",
                record.page_number, record.invoice_number, record.company
            );
            continue;
        }
        if record.near_blank {
            info!("page {}: near-blank, skipped", record.page_number);
            continue;
        }

        info!(
            "page {}: № {} ({})",
            record.page_number, record.invoice_number, record.company
        );

        match open.as_mut() {
            Some(group) if group.base_number == record.base_number() => {
                group.pages.push(record.page_number);
            }
            _ => {
                if let Some(done) = open.take() {
                    groups.push(done);
                }
                open = Some(InvoiceGroup::from_record(record));
            }
        }
    }

    if let Some(done) = open.take() {
        groups.push(done);
    }

    info!("detected {} invoice group(s)", groups.len());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_page_record;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(page: u32, number: &str) -> PageRecord {
        PageRecord {
            page_number: page,
            invoice_number: number.to_string(),
            company: format!("会社{}", number),
            close_date: None,
            is_copy: false,
            no_activity: false,
            near_blank: false,
        }
    }

    fn discarded(page: u32, number: &str) -> PageRecord {
        PageRecord {
            is_copy: true,
            ..record(page, number)
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert_eq!(segment_pages(&[]), vec![]);
    }

    #[test]
    fn continuation_pages_join_their_group() {
        let records = [record(1, "1024"), record(2, "1024-2"), record(3, "1025")];
        let groups = segment_pages(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].base_number, "1024");
        assert_eq!(groups[0].pages, vec![1, 2]);
        assert_eq!(groups[1].base_number, "1025");
        assert_eq!(groups[1].pages, vec![3]);
    }

    #[test]
    fn first_page_wins_for_company_and_date() {
        let mut first = record(1, "1024");
        first.close_date = NaiveDate::from_ymd_opt(2025, 6, 30);
        let mut second = record(2, "1024-2");
        second.company = "別の名前".to_string();
        second.close_date = NaiveDate::from_ymd_opt(2030, 1, 1);

        let groups = segment_pages(&[first.clone(), second]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].company, first.company);
        assert_eq!(groups[0].close_date, first.close_date);
    }

    #[test]
    fn discarded_page_does_not_break_continuity() {
        let records = [
            record(1, "1024"),
            discarded(2, "1024-2"),
            record(3, "1024-3"),
        ];
        let groups = segment_pages(&records);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pages, vec![1, 3]);
    }

    #[test]
    fn all_discardable_pages_yield_zero_groups() {
        let records = [discarded(1, "1024"), discarded(2, "1025")];
        assert_eq!(segment_pages(&records), vec![]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let records = [
            record(1, "1024"),
            discarded(2, "1024-2"),
            record(3, "1024-3"),
            record(4, "1025"),
        ];
        assert_eq!(segment_pages(&records), segment_pages(&records));
    }

    #[test]
    fn same_base_after_other_group_opens_fresh() {
        // Non-adjacent pages with the same base do not merge.
        let records = [record(1, "1024"), record(2, "1025"), record(3, "1024")];
        let groups = segment_pages(&records);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].pages, vec![1]);
        assert_eq!(groups[2].pages, vec![3]);
    }

    /// Extract then segment, the way the pipeline runs.
    #[test]
    fn extraction_to_grouping_scenario() {
        let filler = "明細0123456789".repeat(10);
        let pages = [
            format!("№1024 株式会社山田 御中 2025年6月30日締切分\n{filler}"),
            format!("№1024-2 株式会社山田 御中 （控）\n{filler}"),
            format!("№1025 田中商事 御中\n{filler}"),
        ];

        let records: Vec<PageRecord> = pages
            .iter()
            .enumerate()
            .filter_map(|(i, text)| extract_page_record(i as u32 + 1, Some(text)))
            .collect();
        let groups = segment_pages(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].base_number, "1024");
        assert_eq!(groups[0].company, "株式会社山田");
        assert_eq!(groups[0].pages, vec![1]);
        assert_eq!(groups[0].close_date, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert_eq!(groups[1].base_number, "1025");
        assert_eq!(groups[1].company, "田中商事");
        assert_eq!(groups[1].pages, vec![3]);
        assert_eq!(groups[1].close_date, None);
    }
}
