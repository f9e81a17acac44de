//! Core library for invoice batch splitting.
//!
//! This crate provides:
//! - Page field extraction (invoice number, counterparty, closing date,
//!   classification flags)
//! - Invoice segmentation (suffix-based continuation grouping with
//!   classification-driven exclusion)
//! - PDF page assembly and seal stamping
//! - Output routing (year/month folder, normalized filename)
//! - Company master loading and mail draft composition

pub mod error;
pub mod extract;
pub mod mail;
pub mod master;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod route;
pub mod segment;
pub mod stamp;

pub use error::{Result, SeiqError};
pub use extract::extract_page_record;
pub use mail::MailDraft;
pub use master::{CompanyInfo, CompanyMaster, MailTemplate};
pub use models::invoice::{InvoiceGroup, PageRecord};
pub use pdf::{SourceDocument, assemble_pages};
pub use pipeline::{GroupResult, Pipeline, RunSummary, segment_source};
pub use route::OutputTarget;
pub use segment::segment_pages;
pub use stamp::{SealRole, SealStore, StampOutcome};
