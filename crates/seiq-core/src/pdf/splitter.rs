//! Assembly of per-group documents from the source pages.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// Build a new document containing only the given 1-based pages, in source
/// order.
///
/// The source is cloned and every non-member page deleted, so inherited page
/// attributes survive without manual object surgery; unreferenced objects
/// are pruned afterwards.
pub fn assemble_pages(source: &Document, pages: &[u32]) -> Result<Document> {
    if pages.is_empty() {
        return Err(PdfError::NoPages);
    }

    let total = source.get_pages().len() as u32;
    for &page in pages {
        if page == 0 || page > total {
            return Err(PdfError::InvalidPage(page));
        }
    }

    let mut doc = source.clone();
    let delete: Vec<u32> = (1..=total).filter(|n| !pages.contains(n)).collect();
    if !delete.is_empty() {
        doc.delete_pages(&delete);
    }
    doc.prune_objects();
    doc.renumber_objects();

    debug!("assembled {} page(s) from a {}-page source", pages.len(), total);
    Ok(doc)
}
