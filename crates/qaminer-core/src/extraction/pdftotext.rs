use crate::error::QaError;
use crate::extraction::{PageFragments, PdfExtractor, TextFragment};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout`, which groups words into lines and lines
/// into text blocks. Every block becomes one [`TextFragment`] whose payload
/// is the block's lines, each terminated by `\n`; the trailing newline is
/// what later separates blocks with a blank line in the document sequence.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_fragments(&self, pdf_bytes: &[u8]) -> Result<Vec<PageFragments>, QaError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| QaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| QaError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    QaError::PdftotextNotFound
                } else {
                    QaError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(QaError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_layout(&xml)?;
        log::debug!(
            "pdftotext produced {} page(s), {} fragment(s)",
            pages.len(),
            pages.iter().map(Vec::len).sum::<usize>()
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

struct OpenBlock {
    x: f32,
    y: f32,
    lines: Vec<String>,
}

impl OpenBlock {
    fn into_fragment(self) -> TextFragment {
        let text: String = self.lines.iter().map(|l| format!("{l}\n")).collect();
        TextFragment::new(self.x, self.y, text)
    }
}

/// Parse `pdftotext -bbox-layout` XHTML into per-page fragments.
///
/// pdftotext measures `y` from the top of the page; fragments use the PDF
/// convention (origin at the bottom), so block origins are flipped against
/// the page height.
fn parse_bbox_layout(xml: &str) -> Result<Vec<PageFragments>, QaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageFragments> = Vec::new();
    let mut page_height = 0.0_f32;
    let mut block: Option<OpenBlock> = None;
    let mut words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => {
                    page_height = attr_f32(&e, "height").unwrap_or(0.0);
                    pages.push(Vec::new());
                }
                b"block" => {
                    let x = attr_f32(&e, "xMin").unwrap_or(0.0);
                    let y_max = attr_f32(&e, "yMax").unwrap_or(0.0);
                    block = Some(OpenBlock {
                        x,
                        y: page_height - y_max,
                        lines: Vec::new(),
                    });
                }
                b"line" => words.clear(),
                b"word" => in_word = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"page" => pages.push(Vec::new()),
            Ok(Event::Text(t)) if in_word => {
                let word = t
                    .unescape()
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                let word = word.trim();
                if !word.is_empty() {
                    words.push(word.to_string());
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let Some(open) = block.as_mut() {
                        open.lines.push(words.join(" "));
                    }
                    words.clear();
                }
                b"block" => {
                    if let (Some(open), Some(page)) = (block.take(), pages.last_mut()) {
                        if !open.lines.is_empty() {
                            page.push(open.into_fragment());
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(QaError::Extraction(format!(
                    "malformed pdftotext output at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f32(tag: &BytesStart<'_>, name: &str) -> Option<f32> {
    tag.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .and_then(|v| v.trim().parse().ok())
}
