//! Mail draft composition for finished invoice documents.
//!
//! The core only composes drafts; persisting or handing them to a mail
//! client is the caller's concern.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::master::{CompanyInfo, MailTemplate};

/// Placeholder in the subject template replaced by the closing year/month.
const SUBJECT_DATE_PLACEHOLDER: &str = "YYYY年MM月";

/// Placeholder in the body template replaced by the company name.
const COMPANY_PLACEHOLDER: &str = "A:A";

/// A composed outgoing-mail draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailDraft {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

/// Substitute the literal year/month placeholder in a subject with the
/// closing date's `YYYY年M月` form; the month is not zero padded. A missing
/// placeholder or date leaves the subject untouched.
pub fn replace_date_placeholder(subject: &str, close_date: Option<NaiveDate>) -> String {
    match close_date {
        Some(date) if subject.contains(SUBJECT_DATE_PLACEHOLDER) => subject.replace(
            SUBJECT_DATE_PLACEHOLDER,
            &format!("{}年{}月", date.year(), date.month()),
        ),
        _ => subject.to_string(),
    }
}

/// Compose a draft for one finished document.
///
/// Returns `None` when the company has no mail address configured.
pub fn compose_draft(
    template: &MailTemplate,
    info: &CompanyInfo,
    attachment: &Path,
    close_date: Option<NaiveDate>,
) -> Option<MailDraft> {
    let to = info.email.clone()?;
    Some(MailDraft {
        to,
        cc: info.cc.clone(),
        subject: replace_date_placeholder(&template.subject, close_date),
        body: template.body.replace(COMPANY_PLACEHOLDER, &info.name),
        attachment: attachment.to_path_buf(),
    })
}
