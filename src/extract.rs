//! Keyword evidence extraction from PDF documents.
//!
//! The blob for a document is its lowercase file stem, followed by the
//! `/Keywords` and `/Title` metadata fields and the first page's text when
//! those exist. Parsing problems never escape this module: an unreadable
//! document simply contributes its stem and nothing else.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Object};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::DocumentHandle;

/// Raw fields pulled out of a document before they are lowercased and joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub metadata_keywords: Option<String>,
    pub title: Option<String>,
    pub first_page_text: Option<String>,
}

/// Why a document could not be parsed. Always handled by falling back to the
/// file stem.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("document is empty")]
    Empty,
    #[error("PDF parsing failed: {0}")]
    Pdf(String),
}

/// Turns a file into its metadata and first-page text.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, path: &Path) -> Result<ParsedDocument, ParseError>;
}

/// Production parser: `lopdf` for the info dictionary, `pdf-extract` for text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl DocumentParser for PdfParser {
    fn parse(&self, path: &Path) -> Result<ParsedDocument, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_pdf_bytes(&bytes)
    }
}

pub fn parse_pdf_bytes(bytes: &[u8]) -> Result<ParsedDocument, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| ParseError::Pdf(e.to_string()))?;

    let info = info_dictionary(&doc);
    let metadata_keywords = info.and_then(|d| text_field(d, b"Keywords"));
    let title = info.and_then(|d| text_field(d, b"Title"));

    let first_page_text = doc
        .get_pages()
        .keys()
        .next()
        .copied()
        .and_then(|page| first_page_text(&doc, page));

    Ok(ParsedDocument {
        metadata_keywords,
        title,
        first_page_text,
    })
}

fn info_dictionary(doc: &lopdf::Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn text_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            let text = decode_pdf_string(bytes);
            (!text.trim().is_empty()).then_some(text)
        }
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE or UTF-8 when a BOM says so,
/// otherwise PDFDocEncoding, read as Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Text of `page` via `pdf-extract`, leaving the other pages untouched.
/// A failure, or a panic inside the extractor, counts as a missing page.
fn first_page_text(doc: &lopdf::Document, page: u32) -> Option<String> {
    let extracted = std::panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        {
            let mut output = pdf_extract::PlainTextOutput::new(&mut text);
            pdf_extract::output_doc_page(doc, &mut output, page)?;
        }
        Ok::<_, pdf_extract::OutputError>(text)
    }));
    match extracted {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            debug!(error = %e, page, "page text extraction failed");
            None
        }
        Err(_) => {
            warn!("pdf text extractor panicked; continuing without page text");
            None
        }
    }
}
