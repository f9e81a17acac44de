//! Error types for the seiq-core library.

use thiserror::Error;

/// Main error type for the seiq library.
#[derive(Error, Debug)]
pub enum SeiqError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Company master workbook error.
    #[error("company master error: {0}")]
    Master(#[from] MasterError),

    /// Seal image error.
    #[error("seal error: {0}")]
    Seal(#[from] SealError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Failed to write an output PDF.
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Errors related to the company master workbook.
#[derive(Error, Debug)]
pub enum MasterError {
    /// The workbook could not be opened at all.
    #[error("failed to open workbook: {0}")]
    Workbook(String),

    /// A mandatory sheet is missing.
    #[error("sheet '{0}' not found")]
    MissingSheet(String),

    /// The company sheet contained no usable rows.
    #[error("no company rows found")]
    NoCompanies,

    /// The mail template sheet is incomplete.
    #[error("mail template: {0}")]
    Template(String),
}

/// Errors related to seal images.
#[derive(Error, Debug)]
pub enum SealError {
    /// The seal directory does not exist.
    #[error("seal directory not found: {0}")]
    DirectoryNotFound(String),

    /// The seal directory could not be scanned.
    #[error("failed to read seal directory: {0}")]
    Read(String),

    /// The seal directory contains no PNG images.
    #[error("no seal images found in {0}")]
    NoImages(String),

    /// A seal image could not be decoded.
    #[error("failed to decode seal image {name}: {reason}")]
    Image { name: String, reason: String },

    /// The overlay could not be composited onto the page.
    #[error("failed to composite overlay: {0}")]
    Overlay(String),
}

/// Result type for the seiq library.
pub type Result<T> = std::result::Result<T, SeiqError>;
