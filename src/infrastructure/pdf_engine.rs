//! Receipt render pipeline.
//!
//! Two capabilities, one trait: render an HTML fragment to a PDF file, and
//! append a PNG to an existing PDF as a centered extra page. Production code
//! renders through a scratch browser page (CDP print-to-PDF) and merges with
//! `lopdf`; tests substitute fakes.

use std::path::Path;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, Page};
use lopdf::{dictionary, xobject, Document, Object, Stream};
use thiserror::Error;
use tracing::debug;

/// A4 in PDF points
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const PAGE_MARGIN: f32 = 36.0;

/// Receipt capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The receipt HTML fragment or the preview image was unavailable
    #[error("receipt content unavailable ({selector}): {source}")]
    MissingContent {
        selector: String,
        #[source]
        source: crate::infrastructure::UiError,
    },

    /// Rendering the HTML fragment to PDF failed
    #[error("PDF render failed ({path}): {source}")]
    Render {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Appending the PNG page to the PDF failed
    #[error("PDF merge failed ({path}): {source}")]
    Merge {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Filesystem error while producing artifacts
    #[error("artifact I/O failed ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability to turn captured receipt content into the final PDF artifact
#[allow(async_fn_in_trait)]
pub trait ReceiptRenderer {
    /// Render an HTML fragment to a PDF file at `output` (overwriting)
    async fn html_to_pdf(&self, html: &str, output: &Path) -> Result<(), CaptureError>;

    /// Append `image` to `pdf` as an extra centered page, replacing `pdf`
    /// atomically (temp file + rename-over; the original is never missing)
    fn append_image(&self, pdf: &Path, image: &Path) -> Result<(), CaptureError>;
}

/// Production renderer backed by a scratch chromiumoxide page.
///
/// The scratch page is separate from the order-form page so rendering never
/// disturbs the form state.
#[derive(Clone)]
pub struct ChromiumPdfEngine {
    scratch: Page,
}

impl ChromiumPdfEngine {
    /// Create the engine with its own scratch page
    pub async fn new(browser: &Browser) -> Result<Self, CaptureError> {
        let scratch = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CaptureError::Render {
                path: "about:blank".to_string(),
                source: Box::new(e),
            })?;
        Ok(Self { scratch })
    }
}

impl ReceiptRenderer for ChromiumPdfEngine {
    async fn html_to_pdf(&self, html: &str, output: &Path) -> Result<(), CaptureError> {
        debug!("rendering {} bytes of HTML to {}", html.len(), output.display());
        let js_code = format!(
            "(() => {{ document.open(); document.write({}); document.close(); return true; }})()",
            crate::infrastructure::page_session::js_str(html),
        );
        self.scratch
            .evaluate(js_code)
            .await
            .map_err(|e| CaptureError::Render {
                path: output.display().to_string(),
                source: Box::new(e),
            })?;
        let _ = self
            .scratch
            .save_pdf(PrintToPdfParams::default(), output)
            .await
            .map_err(|e| CaptureError::Render {
                path: output.display().to_string(),
                source: Box::new(e),
            })?;
        Ok(())
    }

    fn append_image(&self, pdf: &Path, image: &Path) -> Result<(), CaptureError> {
        append_image_page(pdf, image)
    }
}

/// Append `image` as an extra page at the end of `pdf`, centered, then
/// replace `pdf` in place.
///
/// The merged document is written to a temp file in the same directory and
/// renamed over the original, so the canonical path always holds either the
/// old or the new complete file.
pub fn append_image_page(pdf: &Path, image: &Path) -> Result<(), CaptureError> {
    let pdf_name = pdf.display().to_string();
    let merge_err = |e: lopdf::Error| CaptureError::Merge {
        path: pdf_name.clone(),
        source: Box::new(e),
    };

    let mut doc = Document::load(pdf).map_err(merge_err)?;
    let img = xobject::image(image).map_err(merge_err)?;

    let img_width = img.dict.get(b"Width").and_then(Object::as_i64).map_err(merge_err)? as f32;
    let img_height = img.dict.get(b"Height").and_then(Object::as_i64).map_err(merge_err)? as f32;

    // Scale to fit inside the margins, never upscale
    let avail_width = PAGE_WIDTH - 2.0 * PAGE_MARGIN;
    let avail_height = PAGE_HEIGHT - 2.0 * PAGE_MARGIN;
    let scale = (avail_width / img_width)
        .min(avail_height / img_height)
        .min(1.0);
    let draw_width = img_width * scale;
    let draw_height = img_height * scale;
    let x = (PAGE_WIDTH - draw_width) / 2.0;
    let y = (PAGE_HEIGHT - draw_height) / 2.0;

    let pages_id = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(merge_err)?;

    let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
        "Contents" => content_id,
    });

    {
        let pages = doc
            .get_object_mut(pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(merge_err)?;
        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(merge_err)?
            .push(Object::Reference(page_id));
        pages.set("Count", count + 1);
    }

    doc.insert_image(page_id, img, (x, y), (draw_width, draw_height))
        .map_err(merge_err)?;

    let dir = pdf.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".receipt-merge")
        .suffix(".pdf")
        .tempfile_in(dir)
        .map_err(|e| CaptureError::Io {
            path: pdf_name.clone(),
            source: e,
        })?;
    doc.save_to(tmp.as_file_mut()).map_err(|e| CaptureError::Io {
        path: pdf_name.clone(),
        source: e,
    })?;
    tmp.persist(pdf).map_err(|e| CaptureError::Io {
        path: pdf_name.clone(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // 2x2 red PNG
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x08, 0x02, 0x00, 0x00, 0x00, 0xfd,
        0xd4, 0x9a, 0x73, 0x00, 0x00, 0x00, 0x11, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
        0xcf, 0xc0, 0xc0, 0xf0, 0x1f, 0x8c, 0x80, 0x18, 0x00, 0x1d, 0xf0, 0x03, 0xfd, 0xd3, 0xd0,
        0x7d, 0x26, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn write_single_page_pdf(path: &Path) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).expect("save pdf");
    }

    #[test]
    fn append_adds_one_page_in_place() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pdf_path = dir.path().join("receipt-1.pdf");
        let png_path = dir.path().join("receipt-1.png");
        write_single_page_pdf(&pdf_path);
        fs::write(&png_path, PNG_BYTES).expect("write png");

        append_image_page(&pdf_path, &png_path).expect("append");

        let merged = Document::load(&pdf_path).expect("reload");
        assert_eq!(merged.get_pages().len(), 2);

        // No temp files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".receipt-merge"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn append_fails_without_source_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pdf_path = dir.path().join("missing.pdf");
        let png_path = dir.path().join("receipt-1.png");
        fs::write(&png_path, PNG_BYTES).expect("write png");

        let result = append_image_page(&pdf_path, &png_path);
        assert!(matches!(result, Err(CaptureError::Merge { .. })));
    }
}
