//! Source document loading and per-page text extraction.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// The input multi-page document, loaded once per run.
///
/// Holds the parsed page tree for assembly and the extracted per-page text
/// for classification.
pub struct SourceDocument {
    document: Document,
    page_texts: Vec<String>,
}

impl SourceDocument {
    /// Load a document from raw bytes and extract text page by page.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if document.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        // A page whose text cannot be extracted yields an empty string and
        // is invisible to extraction downstream.
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(data).unwrap_or_else(|e| {
            debug!("text extraction failed: {}", e);
            vec![String::new(); page_count]
        });

        debug!("loaded PDF with {} pages", page_count);
        Ok(Self {
            document,
            page_texts,
        })
    }

    /// Number of pages in the source.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Text of a 1-based page; empty when extraction produced nothing.
    pub fn page_text(&self, page_number: u32) -> &str {
        (page_number as usize)
            .checked_sub(1)
            .and_then(|idx| self.page_texts.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The parsed document, for page assembly.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
