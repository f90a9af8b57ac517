//! Document ingestion: turns uploaded files into text and image parts the
//! analysis step can send to the model.
//!
//! Resolution order per file:
//! 1. non-blank `extractedText` from the client wins, payload ignored
//! 2. PDFs (up to 20 MB) are decoded and their text extracted server-side
//! 3. images are decoded, sniffed and checked against the size limits
//!
//! PDF extraction is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Largest single image accepted after base64 decoding.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;
/// Largest combined image payload accepted for one analysis.
pub const MAX_TOTAL_IMAGE_BYTES: usize = 4 * 1024 * 1024;
/// Largest PDF accepted for server-side text extraction.
pub const MAX_PDF_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
}

/// A file as the client uploads it. The client's local `uri` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No portfolio document was provided")]
    NoDocuments,

    #[error("File '{name}' has neither a payload nor extracted text")]
    MissingPayload { name: String },

    #[error("File '{name}' is not valid base64: {source}")]
    InvalidBase64 {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("File '{name}' is not a supported image (JPEG, PNG, GIF or WebP)")]
    UnsupportedImage { name: String },

    #[error("File '{name}' is not a PDF document")]
    NotAPdf { name: String },

    #[error("Image '{name}' is {bytes} bytes; the limit is 4 MB. Use a smaller image")]
    ImageTooLarge { name: String, bytes: usize },

    #[error("Images total {bytes} bytes; the limit is 4 MB. Select fewer or lower-resolution images")]
    TotalTooLarge { bytes: usize },

    #[error("PDF '{name}' is {bytes} bytes; the limit is 20 MB")]
    PdfTooLarge { name: String, bytes: usize },

    #[error("PDF '{name}' contains no extractable text. Upload the pages as images instead")]
    EmptyPdf { name: String },

    #[error("Failed to read PDF '{name}': {message}")]
    PdfExtraction { name: String, message: String },
}

#[derive(Debug, Clone)]
pub struct TextPart {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ImagePart {
    pub name: String,
    pub mime_type: &'static str,
    pub data_url: String,
    pub bytes: usize,
}

/// Everything the analysis step needs, in upload order.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSource {
    pub texts: Vec<TextPart>,
    pub images: Vec<ImagePart>,
}

impl PortfolioSource {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty()
    }

    pub fn image_bytes(&self) -> usize {
        self.images.iter().map(|i| i.bytes).sum()
    }
}

/// The document set of a request: `files` when non-empty, otherwise the primary `file`.
pub fn document_set<'a>(
    file: Option<&'a UploadedFile>,
    files: Option<&'a [UploadedFile]>,
) -> Vec<&'a UploadedFile> {
    match files {
        Some(files) if !files.is_empty() => files.iter().collect(),
        _ => file.into_iter().collect(),
    }
}

/// Resolves every file into text or image parts and enforces the size limits.
pub async fn prepare_source(files: &[&UploadedFile]) -> Result<PortfolioSource, DocumentError> {
    if files.is_empty() {
        return Err(DocumentError::NoDocuments);
    }

    let mut source = PortfolioSource::default();

    for file in files {
        if let Some(text) = client_text(file) {
            debug!("Using client-extracted text for '{}'", file.name);
            source.texts.push(TextPart {
                name: file.name.clone(),
                text: text.to_string(),
            });
            continue;
        }

        match file.kind {
            FileKind::Pdf => {
                let text = extract_pdf_text(file).await?;
                source.texts.push(TextPart {
                    name: file.name.clone(),
                    text,
                });
            }
            FileKind::Image => source.images.push(resolve_image(file)?),
        }
    }

    let total = source.image_bytes();
    if total > MAX_TOTAL_IMAGE_BYTES {
        return Err(DocumentError::TotalTooLarge { bytes: total });
    }

    info!(
        "Prepared portfolio source: {} text part(s), {} image(s), {} image bytes",
        source.texts.len(),
        source.images.len(),
        total
    );

    Ok(source)
}

fn client_text(file: &UploadedFile) -> Option<&str> {
    file.extracted_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Decodes an image payload and labels it with its sniffed MIME type.
pub fn resolve_image(file: &UploadedFile) -> Result<ImagePart, DocumentError> {
    let bytes = decode_payload(file)?;
    let mime_type = sniff_image_mime(&bytes).ok_or_else(|| DocumentError::UnsupportedImage {
        name: file.name.clone(),
    })?;

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(DocumentError::ImageTooLarge {
            name: file.name.clone(),
            bytes: bytes.len(),
        });
    }

    if !file.mime_type.is_empty() && file.mime_type != mime_type {
        debug!(
            "'{}' declared {} but contains {}",
            file.name, file.mime_type, mime_type
        );
    }

    debug!(
        "Resolved image '{}' as {} ({} bytes)",
        file.name,
        mime_type,
        bytes.len()
    );

    Ok(ImagePart {
        name: file.name.clone(),
        mime_type,
        data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(&bytes)),
        bytes: bytes.len(),
    })
}

async fn extract_pdf_text(file: &UploadedFile) -> Result<String, DocumentError> {
    let bytes = decode_payload(file)?;
    if !is_pdf(&bytes) {
        return Err(DocumentError::NotAPdf {
            name: file.name.clone(),
        });
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(DocumentError::PdfTooLarge {
            name: file.name.clone(),
            bytes: bytes.len(),
        });
    }

    let name = file.name.clone();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| DocumentError::PdfExtraction {
            name: name.clone(),
            message: e.to_string(),
        })?
        .map_err(|e| DocumentError::PdfExtraction {
            name: name.clone(),
            message: e.to_string(),
        })?;

    let text = normalize_whitespace(&extracted);
    if text.is_empty() {
        return Err(DocumentError::EmptyPdf { name });
    }

    info!("Extracted {} characters of text from '{}'", text.len(), name);
    Ok(text)
}

/// Accepts raw base64 or a full `data:<mime>;base64,` URL.
fn decode_payload(file: &UploadedFile) -> Result<Vec<u8>, DocumentError> {
    let raw = file
        .base64
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DocumentError::MissingPayload {
            name: file.name.clone(),
        })?;

    let raw = raw
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or(raw);

    STANDARD
        .decode(raw)
        .map_err(|source| DocumentError::InvalidBase64 {
            name: file.name.clone(),
            source,
        })
}

pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// Collapses runs of blank lines and trailing spaces left by PDF extraction.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 red PNG
    const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    fn image_file(name: &str, base64: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            kind: FileKind::Image,
            mime_type: "image/jpeg".to_string(),
            base64: Some(base64.to_string()),
            extracted_text: None,
        }
    }

    fn jpeg_of_size(len: usize) -> String {
        let mut bytes = vec![0u8; len];
        bytes[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
        STANDARD.encode(bytes)
    }

    fn pdf_file(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            kind: FileKind::Pdf,
            mime_type: "application/pdf".to_string(),
            base64: Some(STANDARD.encode(bytes)),
            extracted_text: None,
        }
    }

    /// Single-page PDF with Helvetica and the given content stream, xref offsets included.
    fn one_page_pdf(content: &str) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_at = pdf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%EOF\n",
            objects.len() + 1,
            xref_at
        ));
        pdf.extend_from_slice(tail.as_bytes());
        pdf
    }

    #[test]
    fn test_uploaded_file_deserializes_client_shape() {
        let json = serde_json::json!({
            "uri": "blob:http://localhost/abc",
            "name": "portfolio.pdf",
            "type": "pdf",
            "mimeType": "application/pdf",
            "extractedText": "Project: Checkout redesign"
        });
        let file: UploadedFile = serde_json::from_value(json).unwrap();
        assert_eq!(file.kind, FileKind::Pdf);
        assert!(file.base64.is_none());
        assert_eq!(
            file.extracted_text.as_deref(),
            Some("Project: Checkout redesign")
        );
    }

    #[test]
    fn test_sniff_image_mime_known_formats() {
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(b"\x89PNG\r\n\x1a\n...."), Some("image/png"));
        assert_eq!(sniff_image_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_image_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_mime(b"%PDF-1.7"), None);
    }

    #[test]
    fn test_resolve_image_relabels_with_sniffed_mime() {
        let part = resolve_image(&image_file("shot.jpg", TINY_PNG)).unwrap();
        assert_eq!(part.mime_type, "image/png");
        assert!(part.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_resolve_image_accepts_data_url_payload() {
        let payload = format!("data:image/png;base64,{TINY_PNG}");
        let part = resolve_image(&image_file("shot.png", &payload)).unwrap();
        assert_eq!(part.mime_type, "image/png");
    }

    #[test]
    fn test_resolve_image_rejects_oversized_image() {
        let file = image_file("huge.jpg", &jpeg_of_size(MAX_IMAGE_BYTES + 1));
        let err = resolve_image(&file).unwrap_err();
        assert!(matches!(err, DocumentError::ImageTooLarge { .. }));
    }

    #[test]
    fn test_resolve_image_rejects_non_image_bytes() {
        let file = image_file("notes.txt", &STANDARD.encode(b"plain text"));
        assert!(matches!(
            resolve_image(&file),
            Err(DocumentError::UnsupportedImage { .. })
        ));
    }

    #[test]
    fn test_resolve_image_rejects_bad_base64() {
        let file = image_file("broken.png", "not*base64");
        assert!(matches!(
            resolve_image(&file),
            Err(DocumentError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_document_set_prefers_files_list() {
        let primary = image_file("a.png", TINY_PNG);
        let many = vec![image_file("b.png", TINY_PNG), image_file("c.png", TINY_PNG)];
        let set = document_set(Some(&primary), Some(many.as_slice()));
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name, "b.png");

        let set = document_set(Some(&primary), Some(&[][..]));
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].name, "a.png");

        assert!(document_set(None, None).is_empty());
    }

    #[tokio::test]
    async fn test_prepare_source_prefers_client_text() {
        let file = UploadedFile {
            name: "cv.pdf".to_string(),
            kind: FileKind::Pdf,
            mime_type: "application/pdf".to_string(),
            base64: Some("garbage".to_string()),
            extracted_text: Some("  Led the design system migration  ".to_string()),
        };
        let source = prepare_source(&[&file]).await.unwrap();
        assert_eq!(source.texts.len(), 1);
        assert_eq!(source.texts[0].text, "Led the design system migration");
        assert!(source.images.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_source_enforces_total_limit() {
        let half = MAX_TOTAL_IMAGE_BYTES / 2 + 1;
        let a = image_file("a.jpg", &jpeg_of_size(half));
        let b = image_file("b.jpg", &jpeg_of_size(half));
        let err = prepare_source(&[&a, &b]).await.unwrap_err();
        assert!(matches!(err, DocumentError::TotalTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_prepare_source_rejects_pdf_without_pdf_header() {
        let file = UploadedFile {
            name: "cv.pdf".to_string(),
            kind: FileKind::Pdf,
            mime_type: "application/pdf".to_string(),
            base64: Some(TINY_PNG.to_string()),
            extracted_text: None,
        };
        let err = prepare_source(&[&file]).await.unwrap_err();
        assert!(matches!(err, DocumentError::NotAPdf { .. }));
    }

    #[tokio::test]
    async fn test_prepare_source_extracts_pdf_text() {
        let pdf = one_page_pdf("BT /F1 24 Tf 72 720 Td (Checkout redesign) Tj ET");
        let file = pdf_file("case-study.pdf", &pdf);
        let source = prepare_source(&[&file]).await.unwrap();
        assert_eq!(source.texts.len(), 1);
        assert_eq!(source.texts[0].name, "case-study.pdf");
        assert!(source.texts[0].text.contains("Checkout"));
        assert!(source.texts[0].text.contains("redesign"));
        assert!(source.images.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_source_rejects_pdf_without_text() {
        let file = pdf_file("scan.pdf", &one_page_pdf(""));
        let err = prepare_source(&[&file]).await.unwrap_err();
        assert!(matches!(err, DocumentError::EmptyPdf { .. }));
    }

    #[tokio::test]
    async fn test_prepare_source_rejects_oversized_pdf() {
        let mut bytes = vec![b' '; MAX_PDF_BYTES + 1];
        bytes[..8].copy_from_slice(b"%PDF-1.4");
        let err = prepare_source(&[&pdf_file("huge.pdf", &bytes)]).await.unwrap_err();
        match err {
            DocumentError::PdfTooLarge { bytes, .. } => assert_eq!(bytes, MAX_PDF_BYTES + 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prepare_source_requires_documents() {
        assert!(matches!(
            prepare_source(&[]).await,
            Err(DocumentError::NoDocuments)
        ));
    }

    #[tokio::test]
    async fn test_prepare_source_missing_payload() {
        let mut file = image_file("a.png", "");
        file.base64 = None;
        assert!(matches!(
            prepare_source(&[&file]).await,
            Err(DocumentError::MissingPayload { .. })
        ));
    }

    #[test]
    fn test_normalize_whitespace_drops_blank_lines() {
        assert_eq!(
            normalize_whitespace("Title  \n\n\n  Body line\n   \n"),
            "Title\n  Body line"
        );
    }
}
