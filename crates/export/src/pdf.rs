//! PDF output: a titled, gridded table on landscape A4 pages.
//!
//! Uses the built-in Helvetica faces, so no font files are needed. Cells that
//! do not fit their column are cut short with `...`; the header row repeats
//! on every page.

use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::error::{ExportError, Result};
use crate::format::Exporter;
use crate::record::{Column, ScanRecord};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const TITLE: &str = "Cron Job Report";
const TITLE_SIZE: f32 = 16.0;
const FONT_SIZE: f32 = 8.0;
const ROW_HEIGHT: f32 = 6.0;
const CELL_PADDING: f32 = 1.5;
/// Average Helvetica glyph width at `FONT_SIZE`, in millimetres.
const CHAR_WIDTH: f32 = 1.45;

/// Columns and their widths in millimetres; widths fill the printable area.
const LAYOUT: [(Column, f32); 7] = [
    (Column::Schedule, 28.0),
    (Column::Description, 55.0),
    (Column::Command, 70.0),
    (Column::User, 18.0),
    (Column::RunAt, 32.0),
    (Column::LineNumber, 12.0),
    (Column::LineContent, 52.0),
];

pub struct PdfExporter;

impl Exporter for PdfExporter {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, _records: &[ScanRecord]) -> Result<String> {
        Err(ExportError::RequiresFile { format: "pdf" })
    }

    fn write_file(&self, records: &[ScanRecord], path: &Path) -> Result<()> {
        let bytes = render_document(records)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

fn pdf_error(e: printpdf::Error) -> ExportError {
    ExportError::Pdf(e.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_document(records: &[ScanRecord]) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;
    layer.use_text(TITLE, TITLE_SIZE, Mm(MARGIN), Mm(y - 6.0), &fonts.bold);
    y -= 14.0;

    if records.is_empty() {
        layer.use_text("No cron entries found.", 10.0, Mm(MARGIN), Mm(y - 5.0), &fonts.regular);
        return doc.save_to_bytes().map_err(pdf_error);
    }

    draw_header(&layer, &fonts, y);
    y -= ROW_HEIGHT;

    for record in records {
        if y - ROW_HEIGHT < MARGIN {
            layer = new_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
            draw_header(&layer, &fonts, y);
            y -= ROW_HEIGHT;
        }
        let cells = LAYOUT.map(|(column, _)| record.value(column));
        draw_row(&layer, &fonts.regular, y, &cells);
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, top: f32) {
    let labels = LAYOUT.map(|(column, _)| column.label().to_string());
    draw_row(layer, &fonts.bold, top, &labels);
}

/// Draw one row whose top edge is at `top`, boxed on all sides.
fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, top: f32, cells: &[String]) {
    let bottom = top - ROW_HEIGHT;
    let right = MARGIN + LAYOUT.iter().map(|(_, w)| w).sum::<f32>();

    layer.set_outline_thickness(0.3);
    layer.add_line(segment((MARGIN, top), (right, top)));
    layer.add_line(segment((MARGIN, bottom), (right, bottom)));

    let mut x = MARGIN;
    layer.add_line(segment((x, top), (x, bottom)));
    for (cell, (_, width)) in cells.iter().zip(LAYOUT) {
        let text = fit(cell, width - 2.0 * CELL_PADDING);
        layer.use_text(text, FONT_SIZE, Mm(x + CELL_PADDING), Mm(bottom + 2.0), font);
        x += width;
        layer.add_line(segment((x, top), (x, bottom)));
    }
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}

/// Cut `text` to the characters that fit in `width` millimetres.
fn fit(text: &str, width: f32) -> String {
    let capacity = (width / CHAR_WIDTH).floor() as usize;
    if text.chars().count() <= capacity {
        return text.to_string();
    }
    let kept: String = text.chars().take(capacity.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line_number: usize) -> ScanRecord {
        ScanRecord {
            schedule: "*/5 * * * *".to_string(),
            description: "Every 5 minutes".to_string(),
            command: "/usr/local/bin/poll --verbose --retries 3".to_string(),
            user: None,
            run_at: None,
            line_number,
            line_content: "*/5 * * * * /usr/local/bin/poll --verbose --retries 3".to_string(),
            minute: "*/5".to_string(),
            hour: "*".to_string(),
            day_of_month: "*".to_string(),
            month: "*".to_string(),
            day_of_week: "*".to_string(),
        }
    }

    #[test]
    fn layout_fills_printable_width() {
        let total: f32 = LAYOUT.iter().map(|(_, w)| w).sum();
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.01);
    }

    #[test]
    fn long_cells_are_shortened() {
        assert_eq!(fit("short", 20.0), "short");
        let cut = fit(&"x".repeat(100), 10.0);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 6);
    }

    #[test]
    fn render_to_text_is_refused() {
        assert!(matches!(
            PdfExporter.render(&[]),
            Err(ExportError::RequiresFile { format: "pdf" })
        ));
    }

    #[test]
    fn writes_pdf_across_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.pdf");
        let records: Vec<_> = (1..=80).map(record).collect();
        PdfExporter.write_file(&records, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_report_still_renders() {
        let bytes = render_document(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
