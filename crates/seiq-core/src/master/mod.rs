//! Company master workbook: counterparty directory, mail template and
//! storage root.
//!
//! Workbook layout: sheet `会社マスタ` holds one company per row (name, mail
//! address, optional CC) under a header row; sheet `メール` holds the subject
//! template in A2 and the body lines under a `メール本文` header cell; the
//! optional sheet `保存先` holds the storage root in B1.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use tracing::{info, warn};

use crate::error::MasterError;

/// Result type for master operations.
pub type Result<T> = std::result::Result<T, MasterError>;

const COMPANY_SHEET: &str = "会社マスタ";
const MAIL_SHEET: &str = "メール";
const OUTPUT_SHEET: &str = "保存先";
const BODY_HEADER: &str = "メール本文";

/// Mail routing for one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    pub email: Option<String>,
    pub cc: Option<String>,
}

/// Subject/body template with its placeholders unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailTemplate {
    pub subject: String,
    pub body: String,
}

/// The loaded company master.
pub struct CompanyMaster {
    companies: HashMap<String, CompanyInfo>,
    template: MailTemplate,
    storage_root: Option<PathBuf>,
}

impl CompanyMaster {
    /// Build a master from already-loaded parts, bypassing the workbook.
    pub fn from_parts(
        companies: Vec<CompanyInfo>,
        template: MailTemplate,
        storage_root: Option<PathBuf>,
    ) -> Self {
        let companies = companies
            .into_iter()
            .map(|info| (info.name.clone(), info))
            .collect();
        Self {
            companies,
            template,
            storage_root,
        }
    }

    /// Load the master workbook from disk.
    pub fn load(path: &Path) -> Result<Self> {
        info!("loading company master: {}", path.display());
        let mut workbook =
            open_workbook_auto(path).map_err(|e| MasterError::Workbook(e.to_string()))?;

        let company_range = workbook
            .worksheet_range(COMPANY_SHEET)
            .map_err(|_| MasterError::MissingSheet(COMPANY_SHEET.to_string()))?;
        let mail_range = workbook
            .worksheet_range(MAIL_SHEET)
            .map_err(|_| MasterError::MissingSheet(MAIL_SHEET.to_string()))?;
        let storage_root = workbook
            .worksheet_range(OUTPUT_SHEET)
            .ok()
            .and_then(|range| parse_storage_root(&range));

        let companies = parse_companies(&company_range)?;
        let template = parse_template(&mail_range)?;

        info!("loaded {} company entries", companies.len());
        match &storage_root {
            Some(root) => info!("storage root from master: {}", root.display()),
            None => warn!("no storage root configured in the master"),
        }

        Ok(Self {
            companies,
            template,
            storage_root,
        })
    }

    /// Look up a company by its extracted name.
    pub fn company(&self, name: &str) -> Option<&CompanyInfo> {
        self.companies.get(name)
    }

    /// The mail template, placeholders unexpanded.
    pub fn template(&self) -> &MailTemplate {
        &self.template
    }

    /// The storage root from the 保存先 sheet, when configured.
    pub fn storage_root(&self) -> Option<&Path> {
        self.storage_root.as_deref()
    }

    /// Number of loaded companies.
    pub fn company_count(&self) -> usize {
        self.companies.len()
    }
}

fn parse_companies(range: &Range<Data>) -> Result<HashMap<String, CompanyInfo>> {
    let mut companies = HashMap::new();

    // Header row first; rows without a company name are skipped.
    for row in range.rows().skip(1) {
        let Some(name) = cell_string(row, 0) else {
            continue;
        };
        let email = cell_string(row, 1);
        let cc = cell_string(row, 2);

        if email.is_none() {
            warn!("company '{}' has no mail address", name);
        }

        companies.insert(name.clone(), CompanyInfo { name, email, cc });
    }

    if companies.is_empty() {
        return Err(MasterError::NoCompanies);
    }
    Ok(companies)
}

fn parse_template(range: &Range<Data>) -> Result<MailTemplate> {
    let rows: Vec<&[Data]> = range.rows().collect();

    let subject = rows
        .get(1)
        .and_then(|row| cell_string(row, 0))
        .ok_or_else(|| MasterError::Template("subject cell (A2) is empty".to_string()))?;

    let header_row = rows
        .iter()
        .take(20)
        .position(|row| {
            row.first()
                .and_then(|c| c.as_string())
                .map(|s| s.contains(BODY_HEADER))
                .unwrap_or(false)
        })
        .ok_or_else(|| MasterError::Template(format!("no '{}' header row", BODY_HEADER)))?;

    // Body lines run from the row after the header to the first empty cell.
    let mut body_lines = Vec::new();
    for row in rows.iter().skip(header_row + 1) {
        match row.first().and_then(|c| c.as_string()) {
            Some(line) => body_lines.push(line),
            None => break,
        }
    }

    let body = body_lines.join("\n").trim().to_string();
    if body.is_empty() {
        return Err(MasterError::Template("mail body is empty".to_string()));
    }

    Ok(MailTemplate { subject, body })
}

fn parse_storage_root(range: &Range<Data>) -> Option<PathBuf> {
    let first_row = range.rows().next()?;
    let value = cell_string(first_row, 1)?;
    Some(PathBuf::from(value))
}

/// A trimmed, non-empty cell value.
fn cell_string(row: &[Data], idx: usize) -> Option<String> {
    let value = row.get(idx)?.as_string()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range_from_rows(rows: Vec<Vec<&str>>) -> Range<Data> {
        let mut max_cols = 0;
        for row in &rows {
            max_cols = max_cols.max(row.len());
        }
        let end = (rows.len().max(1) as u32 - 1, max_cols.max(1) as u32 - 1);
        let mut range = Range::new((0, 0), end);
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(cell.to_string()));
                }
            }
        }
        range
    }

    #[test]
    fn companies_parse_with_optional_cc() {
        let range = range_from_rows(vec![
            vec!["会社名", "メール", "CC"],
            vec!["株式会社山田", "yamada@example.co.jp", "cc@example.co.jp"],
            vec!["田中商事", "tanaka@example.co.jp"],
            vec!["", "orphan@example.co.jp"],
        ]);

        let companies = parse_companies(&range).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(
            companies["株式会社山田"].cc.as_deref(),
            Some("cc@example.co.jp")
        );
        assert_eq!(companies["田中商事"].cc, None);
    }

    #[test]
    fn empty_company_sheet_is_an_error() {
        let range = range_from_rows(vec![vec!["会社名", "メール"]]);
        assert!(matches!(parse_companies(&range), Err(MasterError::NoCompanies)));
    }

    #[test]
    fn template_collects_body_until_first_empty_cell() {
        let range = range_from_rows(vec![
            vec!["メールタイトル"],
            vec!["【御請求】YYYY年MM月分 ご請求書送付の件"],
            vec![""],
            vec!["メール本文"],
            vec!["A:A"],
            vec!["ご担当者様"],
            vec![""],
            vec!["この行は本文に入らない"],
        ]);

        let template = parse_template(&range).unwrap();
        assert_eq!(template.subject, "【御請求】YYYY年MM月分 ご請求書送付の件");
        assert_eq!(template.body, "A:A\nご担当者様");
    }

    #[test]
    fn missing_body_header_is_an_error() {
        let range = range_from_rows(vec![vec!["メールタイトル"], vec!["件名"]]);
        assert!(matches!(
            parse_template(&range),
            Err(MasterError::Template(_))
        ));
    }

    #[test]
    fn storage_root_comes_from_b1() {
        let range = range_from_rows(vec![vec!["フォルダ", r"\\srv\共通\請求書"]]);
        assert_eq!(
            parse_storage_root(&range),
            Some(PathBuf::from(r"\\srv\共通\請求書"))
        );
    }
}
