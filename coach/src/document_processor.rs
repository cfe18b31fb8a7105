use crate::models::{DocumentKind, ExtractionResult};
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};

/// Turns uploaded PDF and CSV documents into plain text.
///
/// Extraction never fails the request: parser errors come back as
/// [`ExtractionResult::Failed`] so the caller can still show them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentProcessor;

impl DocumentProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract<R: Read>(&self, kind: DocumentKind, mut reader: R) -> ExtractionResult {
        match kind {
            DocumentKind::Csv => self.extract_csv_text(reader),
            DocumentKind::Pdf => {
                let mut bytes = Vec::new();
                if let Err(e) = reader.read_to_end(&mut bytes) {
                    return ExtractionResult::failed(kind, e.to_string());
                }
                self.extract_pdf_text(&bytes)
            }
        }
    }

    pub fn extract_pdf_text(&self, bytes: &[u8]) -> ExtractionResult {
        // pdf-extract panics on some malformed documents instead of erroring
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match pages {
            Ok(Ok(pages)) => {
                log::info!("Extracted text from {} PDF pages", pages.len());
                ExtractionResult::Extracted(join_pages(pages))
            }
            Ok(Err(e)) => {
                log::warn!("PDF extraction failed: {}", e);
                ExtractionResult::failed(DocumentKind::Pdf, e.to_string())
            }
            Err(_) => {
                log::warn!("PDF extraction panicked");
                ExtractionResult::failed(DocumentKind::Pdf, "malformed PDF document")
            }
        }
    }

    pub fn extract_csv_text<R: Read>(&self, reader: R) -> ExtractionResult {
        match read_table(reader) {
            Ok(table) => {
                log::info!("Parsed CSV with {} rows", table.rows.len());
                ExtractionResult::Extracted(table.render())
            }
            Err(reason) => {
                log::warn!("CSV parsing failed: {}", reason);
                ExtractionResult::failed(DocumentKind::Csv, reason)
            }
        }
    }
}

/// Pages with no text are skipped, the rest end with a newline.
fn join_pages<I: IntoIterator<Item = String>>(pages: I) -> String {
    let mut text = String::new();
    for page in pages {
        if !page.is_empty() {
            text.push_str(&page);
            text.push('\n');
        }
    }
    text.trim().to_string()
}

#[derive(Debug)]
struct Table {
    headers: Vec<String>,
    /// `None` marks a missing value.
    rows: Vec<Vec<Option<String>>>,
}

const MISSING: &str = "NaN";

fn read_table<R: Read>(reader: R) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err("No columns to parse from file".to_string());
    }

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            ));
        }

        // short rows are padded with missing values
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
            .collect();
        row.resize(headers.len(), None);
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

impl Table {
    /// Fixed-width rendering: a left-justified row index, then each column
    /// right-justified behind a single space. Value cells carry one leading
    /// space of their own unless the whole column is missing.
    fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: []",
                self.headers.join(", ")
            );
        }

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let all_missing = self.rows.iter().all(|row| row[col].is_none());
                let lead = if all_missing { 0 } else { 1 };
                let widest = self
                    .rows
                    .iter()
                    .map(|row| row[col].as_deref().unwrap_or(MISSING).chars().count())
                    .max()
                    .unwrap_or(0);
                header.chars().count().max(lead + widest)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let header_cells: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        lines.push(render_line(&" ".repeat(index_width), &header_cells, &widths));
        for (idx, row) in self.rows.iter().enumerate() {
            let index = format!("{:<width$}", idx, width = index_width);
            let cells: Vec<&str> = row.iter().map(|cell| cell.as_deref().unwrap_or(MISSING)).collect();
            lines.push(render_line(&index, &cells, &widths));
        }
        lines.join("\n")
    }
}

fn render_line(index: &str, cells: &[&str], widths: &[usize]) -> String {
    let mut line = index.to_string();
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(&format!("{:>width$}", cell, width = *width));
    }
    line
}
