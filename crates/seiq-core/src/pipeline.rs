//! The batch pipeline with its per-group error boundary.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{PdfError, SeiqError};
use crate::extract::extract_page_record;
use crate::mail::{MailDraft, compose_draft};
use crate::master::CompanyMaster;
use crate::models::invoice::InvoiceGroup;
use crate::pdf::{SourceDocument, assemble_pages};
use crate::route::{ensure_directory, resolve_target};
use crate::segment::segment_pages;
use crate::stamp::{SealStore, StampOutcome, stamp_first_page};

/// Outcome of processing one invoice group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    pub company: String,
    pub base_number: String,
    pub pages: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDate>,
    /// Written document path, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Whether the document was stamped, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamped: Option<StampOutcome>,
    /// Failure reason, when the group failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GroupResult {
    /// Whether the group's document was written.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one whole run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub results: Vec<GroupResult>,
    pub drafts: Vec<MailDraft>,
    pub output_root: PathBuf,
}

impl RunSummary {
    /// Number of groups the run attempted.
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Number of groups whose document was written.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }
}

/// Extract a record for every page and group them.
///
/// Pages without an invoice number produce no record and are invisible to
/// segmentation.
pub fn segment_source(source: &SourceDocument) -> Vec<InvoiceGroup> {
    let records: Vec<_> = (1..=source.page_count())
        .filter_map(|page| extract_page_record(page, Some(source.page_text(page))))
        .collect();
    segment_pages(&records)
}

/// The batch pipeline: a company master and seal store applied to one
/// source document.
pub struct Pipeline<'a> {
    master: &'a CompanyMaster,
    seals: &'a SealStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(master: &'a CompanyMaster, seals: &'a SealStore) -> Self {
        Self { master, seals }
    }

    /// Split, stamp, route and persist every invoice group in the source.
    ///
    /// A failing group is recorded in its [`GroupResult`] and the remaining
    /// groups continue; the run itself only fails on errors before the
    /// per-group loop.
    pub fn process(&self, source: &SourceDocument, output_root: &Path) -> RunSummary {
        let groups = segment_source(source);

        let mut results = Vec::with_capacity(groups.len());
        let mut drafts = Vec::new();
        for (idx, group) in groups.iter().enumerate() {
            info!(
                "[{}/{}] {} (№ {})",
                idx + 1,
                groups.len(),
                group.company,
                group.base_number
            );
            let (result, draft) = self.run_group(source, group, output_root);
            results.push(result);
            drafts.extend(draft);
        }

        RunSummary {
            results,
            drafts,
            output_root: output_root.to_path_buf(),
        }
    }

    /// Process one group, converting any failure into the result record.
    pub fn run_group(
        &self,
        source: &SourceDocument,
        group: &InvoiceGroup,
        output_root: &Path,
    ) -> (GroupResult, Option<MailDraft>) {
        let mut result = GroupResult {
            company: group.company.clone(),
            base_number: group.base_number.clone(),
            pages: group.pages.clone(),
            close_date: group.close_date,
            output: None,
            stamped: None,
            error: None,
        };

        match self.write_group(source, group, output_root) {
            Ok((path, outcome)) => {
                info!("wrote {}", path.display());
                let draft = self.draft_for(group, &path);
                result.output = Some(path);
                result.stamped = Some(outcome);
                (result, draft)
            }
            Err(e) => {
                error!("{} (№ {}): {}", group.company, group.base_number, e);
                result.error = Some(e.to_string());
                (result, None)
            }
        }
    }

    fn write_group(
        &self,
        source: &SourceDocument,
        group: &InvoiceGroup,
        output_root: &Path,
    ) -> Result<(PathBuf, StampOutcome), SeiqError> {
        let mut doc = assemble_pages(source.document(), &group.pages)?;
        let outcome = stamp_first_page(&mut doc, self.seals)?;

        let target = resolve_target(output_root, group);
        ensure_directory(&target)?;

        let path = target.path();
        doc.save(&path)
            .map_err(|e| PdfError::Write(e.to_string()))?;
        Ok((path, outcome))
    }

    fn draft_for(&self, group: &InvoiceGroup, path: &Path) -> Option<MailDraft> {
        match self.master.company(&group.company) {
            Some(info) => compose_draft(self.master.template(), info, path, group.close_date),
            None => {
                warn!("company '{}' is not in the master", group.company);
                None
            }
        }
    }
}
