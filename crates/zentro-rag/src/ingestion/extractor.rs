//! Plain-text extraction from uploaded files

use crate::error::{Error, Result};

/// Upload formats we can extract text from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
}

impl FileKind {
    /// Decide the format from the filename extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self> {
        let name = filename.to_ascii_lowercase();
        if name.ends_with(".txt") {
            Ok(FileKind::Text)
        } else if name.ends_with(".pdf") {
            Ok(FileKind::Pdf)
        } else {
            let extension = name.rsplit('.').next().unwrap_or("").to_string();
            Err(Error::UnsupportedFormat(extension))
        }
    }
}

/// Extracts UTF-8 text from uploaded PDF/TXT bytes
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from an uploaded file.
    ///
    /// Returns [`Error::NoContent`] when the file yields only whitespace.
    pub fn extract(filename: &str, data: &[u8]) -> Result<String> {
        let text = match FileKind::from_filename(filename)? {
            FileKind::Text => Self::decode_text(data),
            FileKind::Pdf => Self::extract_pdf(data)?,
        };

        if text.trim().is_empty() {
            return Err(Error::NoContent);
        }

        Ok(text)
    }

    /// Decode text bytes as UTF-8, falling back to Latin-1 for invalid input.
    /// Decoding is permissive and never fails.
    fn decode_text(data: &[u8]) -> String {
        match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(_) => data.iter().map(|&b| b as char).collect(),
        }
    }

    /// Extract PDF text in page order.
    fn extract_pdf(data: &[u8]) -> Result<String> {
        match pdf_extract::extract_text_from_mem(data) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!("pdf-extract failed: {}, trying page-wise fallback", e);
                Self::extract_pdf_fallback(data)
            }
        }
    }

    /// Page-by-page fallback using lopdf; concatenates pages in page order.
    fn extract_pdf_fallback(data: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::Internal(format!("Failed to load PDF: {}", e)))?;

        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(e) => {
                    tracing::debug!("Could not extract text from page {}: {}", page_number, e);
                }
            }
        }

        Ok(text)
    }
}
