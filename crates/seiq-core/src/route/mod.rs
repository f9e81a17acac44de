//! Output routing: destination folder and filename for a finished group.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::extract::short_date_form;
use crate::models::config::{FILENAME_SUFFIX, RESERVED_FILENAME_CHARS};
use crate::models::invoice::InvoiceGroup;

/// Resolved destination for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Destination directory: the storage root plus an optional year/month
    /// folder.
    pub directory: PathBuf,
    /// Final file name.
    pub filename: String,
}

impl OutputTarget {
    /// Full destination path.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Replace each reserved filesystem character with an underscore.
pub fn sanitize_filename_part(name: &str) -> String {
    name.chars()
        .map(|c| {
            if RESERVED_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// `YYYY年M月` folder label for a closing date; the month is not padded.
pub fn month_folder_label(date: NaiveDate) -> String {
    format!("{}年{}月", date.year(), date.month())
}

/// Output file name: optional YYMMDD prefix, sanitized counterparty name,
/// fixed suffix.
pub fn build_filename(group: &InvoiceGroup) -> String {
    let company = sanitize_filename_part(&group.company);
    match group.close_date {
        Some(date) => format!("{}{}{}.pdf", short_date_form(date), company, FILENAME_SUFFIX),
        None => format!("{}{}.pdf", company, FILENAME_SUFFIX),
    }
}

/// Resolve the destination for a group under the storage root.
///
/// Groups without a closing date land directly in the root.
pub fn resolve_target(root: &Path, group: &InvoiceGroup) -> OutputTarget {
    let directory = match group.close_date {
        Some(date) => root.join(month_folder_label(date)),
        None => root.to_path_buf(),
    };
    OutputTarget {
        directory,
        filename: build_filename(group),
    }
}

/// Create the target directory if needed; an existing directory is reused.
pub fn ensure_directory(target: &OutputTarget) -> std::io::Result<()> {
    if target.directory.exists() {
        debug!("using existing folder: {}", target.directory.display());
    } else {
        fs::create_dir_all(&target.directory)?;
        info!("created folder: {}", target.directory.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(company: &str, close_date: Option<NaiveDate>) -> InvoiceGroup {
        InvoiceGroup {
            base_number: "1024".to_string(),
            company: company.to_string(),
            pages: vec![1],
            close_date,
        }
    }

    #[test]
    fn sanitization_replaces_every_reserved_character() {
        let sanitized = sanitize_filename_part(r#"a\b/c:d*e?f"g<h>i|j"#);
        assert_eq!(sanitized, "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn sanitizing_a_clean_name_is_a_no_op() {
        assert_eq!(sanitize_filename_part("株式会社山田"), "株式会社山田");
        let once = sanitize_filename_part(r"山田/製作所");
        assert_eq!(sanitize_filename_part(&once), once);
    }

    #[test]
    fn filename_with_closing_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30);
        let g = group("株式会社山田", date);
        assert_eq!(build_filename(&g), "250630株式会社山田請求書.pdf");
    }

    #[test]
    fn filename_without_closing_date_drops_the_prefix() {
        let g = group("田中商事", None);
        assert_eq!(build_filename(&g), "田中商事請求書.pdf");
    }

    #[test]
    fn month_folder_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(month_folder_label(date), "2025年6月");
        let december = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(month_folder_label(december), "2025年12月");
    }

    #[test]
    fn target_without_date_stays_in_root() {
        let g = group("田中商事", None);
        let target = resolve_target(Path::new("/srv/invoices"), &g);
        assert_eq!(target.directory, Path::new("/srv/invoices"));
        assert_eq!(target.path(), Path::new("/srv/invoices/田中商事請求書.pdf"));
    }

    #[test]
    fn target_with_date_gets_a_month_folder() {
        let g = group("株式会社山田", NaiveDate::from_ymd_opt(2025, 6, 30));
        let target = resolve_target(Path::new("/srv/invoices"), &g);
        assert_eq!(target.directory, Path::new("/srv/invoices/2025年6月"));
    }

    #[test]
    fn directory_creation_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let g = group("株式会社山田", NaiveDate::from_ymd_opt(2025, 6, 30));
        let target = resolve_target(root.path(), &g);

        ensure_directory(&target).unwrap();
        assert!(target.directory.is_dir());
        ensure_directory(&target).unwrap();
        assert!(target.directory.is_dir());
    }
}
