//! Paginates the document model onto letter-sized pages with `printpdf`.
//!
//! The cover page carries no header or footer; every later page draws a
//! centered title header and a packet/page-number/attribution footer. Course
//! tables repeat their header row when they spill onto a new page.

use std::io::BufWriter;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::domain::model::{
    CourseSection, CoverBlock, PageDecor, ReportDocument, RowKind, TableRow,
};
use crate::utils::error::{ReportError, Result};

// US letter.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const PT_TO_MM: f32 = 0.352_778;

const MARGIN_LEFT: f32 = 20.0;
const CONTENT_TOP: f32 = 260.0;
const CONTENT_BOTTOM: f32 = 40.0;

const TABLE_LEFT: f32 = 25.0;
const TABLE_RIGHT: f32 = 190.0;
// Column bounds: term, modality, enrollments, sections.
const COLUMNS: [(f32, f32); 4] = [(25.0, 65.0), (65.0, 115.0), (115.0, 152.5), (152.5, 190.0)];
const ROW_HEIGHT: f32 = 6.0;
const HEADER_Y: f32 = 272.3;
const FOOTER_Y: f32 = 10.6;

/// Renders the assembled document to PDF bytes.
pub fn render(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new(document)?;
    writer.cover(&document.cover);
    for section in &document.sections {
        writer.section(section);
    }
    writer.finish()
}

struct PageWriter<'a> {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    decor: &'a PageDecor,
    page_number: usize,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(document: &'a ReportDocument) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            document.decor.header_title.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::RenderError { message: e.to_string() })?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::RenderError { message: e.to_string() })?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            font,
            bold,
            decor: &document.decor,
            page_number: 1,
            y: CONTENT_TOP,
        })
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ReportError::RenderError { message: e.to_string() })?;
        buf.into_inner()
            .map_err(|e| ReportError::RenderError { message: e.to_string() })
    }

    // ---- page management ----

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_number += 1;
        self.y = CONTENT_TOP;
        self.draw_header_footer();
    }

    fn draw_header_footer(&self) {
        self.text_centered(&self.decor.header_title, 10.0, HEADER_Y, &self.font);
        self.text(&self.decor.packet_label, 8.0, MARGIN_LEFT / 2.0, FOOTER_Y, &self.font);
        self.text_centered(&format!("Page {}", self.page_number), 8.0, FOOTER_Y, &self.font);
        self.text(
            &self.decor.attribution_tag,
            8.0,
            PAGE_WIDTH - 35.3,
            FOOTER_Y,
            &self.font,
        );
    }

    // ---- primitives ----

    fn text(&self, text: &str, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn text_centered(&self, text: &str, size: f32, y: f32, font: &IndirectFontRef) {
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.text(text, size, x, y, font);
    }

    fn text_centered_in(
        &self,
        text: &str,
        size: f32,
        left: f32,
        right: f32,
        y: f32,
        font: &IndirectFontRef,
    ) {
        let x = left + (right - left - text_width_mm(text, size)) / 2.0;
        self.text(text, size, x, y, font);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn vline(&self, x: f32, y1: f32, y2: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x), Mm(y1)), false),
                (Point::new(Mm(x), Mm(y2)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn band(&self, bottom: f32, top: f32, color: Color) {
        let rect = Rect::new(Mm(TABLE_LEFT), Mm(bottom), Mm(TABLE_RIGHT), Mm(top))
            .with_mode(PaintMode::Fill);
        self.layer.set_fill_color(color);
        self.layer.add_rect(rect);
    }

    fn set_text_color(&self, color: Color) {
        self.layer.set_fill_color(color);
    }

    // ---- blocks ----

    fn cover(&mut self, cover: &CoverBlock) {
        let mut y = 240.0;
        for line in &cover.title_lines {
            self.text_centered(line, 18.0, y, &self.bold);
            y -= 12.0;
        }

        y = 100.0;
        for line in &cover.attribution_lines {
            self.text_centered(line, 14.0, y, &self.bold);
            y -= 9.0;
        }
    }

    fn section(&mut self, section: &CourseSection) {
        self.new_page();

        self.text(&section.heading, 13.0, MARGIN_LEFT, self.y, &self.bold);
        self.y -= 10.0;

        self.table_header_row(&section.table.header);
        for row in &section.table.rows {
            if self.y - ROW_HEIGHT < CONTENT_BOTTOM {
                self.new_page();
                self.table_header_row(&section.table.header);
            }
            self.table_row(row);
        }

        self.y -= 8.0;
        self.notes(&section.notes);
    }

    fn table_header_row(&mut self, header: &[&'static str; 4]) {
        let top = self.y;
        let bottom = top - ROW_HEIGHT;

        self.band(bottom, top, purple());
        self.set_text_color(whitesmoke());
        for (label, (left, right)) in header.iter().zip(COLUMNS) {
            self.text_centered_in(label, 10.0, left, right, bottom + 1.8, &self.bold);
        }
        self.set_text_color(black());
        self.grid_row(bottom, top);

        self.y = bottom;
    }

    fn table_row(&mut self, row: &TableRow) {
        let top = self.y;
        let bottom = top - ROW_HEIGHT;

        let (text_color, font) = match row.kind {
            RowKind::GrandTotal => {
                self.band(bottom, top, purple());
                (whitesmoke(), &self.bold)
            }
            RowKind::Subtotal => (black(), &self.bold),
            RowKind::Modality => (black(), &self.font),
        };

        self.set_text_color(text_color);
        for (cell, (left, right)) in row.cells.iter().zip(COLUMNS) {
            self.text_centered_in(cell, 10.0, left, right, bottom + 1.8, font);
        }
        self.set_text_color(black());
        self.grid_row(bottom, top);

        self.y = bottom;
    }

    fn grid_row(&self, bottom: f32, top: f32) {
        self.layer.set_outline_thickness(0.4);
        self.layer.set_outline_color(black());
        self.hline(TABLE_LEFT, TABLE_RIGHT, top);
        self.hline(TABLE_LEFT, TABLE_RIGHT, bottom);
        self.vline(TABLE_LEFT, bottom, top);
        for (_, right) in COLUMNS {
            self.vline(right, bottom, top);
        }
    }

    fn notes(&mut self, notes: &[String]) {
        for note in notes {
            for line in wrap_text(note, 100) {
                if self.y < CONTENT_BOTTOM {
                    self.new_page();
                }
                self.text(&line, 9.0, MARGIN_LEFT, self.y, &self.font);
                self.y -= 4.2;
            }
            self.y -= 1.5;
        }
    }
}

fn purple() -> Color {
    Color::Rgb(Rgb::new(0.5, 0.0, 0.5, None))
}

fn whitesmoke() -> Color {
    Color::Rgb(Rgb::new(0.96, 0.96, 0.96, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Approximate line width for the builtin Helvetica face. Exact metrics are
/// not exposed, so centering assumes an average advance of half an em.
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * PT_TO_MM
}

/// Greedy word wrap used for the note blocks.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CourseSummary, ModalityTally, ReportMeta, TermBreakdown, TermKey};
    use crate::report::builder;

    fn meta() -> ReportMeta {
        ReportMeta {
            prefix: "ELC".to_string(),
            date_range: "Spring 2020 - Spring 2024".to_string(),
            provider: "Center for Institutional Effectiveness".to_string(),
            published: "December 2024".to_string(),
        }
    }

    fn breakdown(term: &str) -> TermBreakdown {
        let tally = ModalityTally { enrollments: 1, sections: 1 };
        TermBreakdown {
            term: term.to_string(),
            key: TermKey::parse(term).unwrap(),
            tallies: [tally, tally, tally],
            subtotal: ModalityTally { enrollments: 3, sections: 3 },
        }
    }

    #[test]
    fn test_render_cover_only_document() {
        let document = builder::build_document(&meta(), &[]);

        let bytes = render(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_document_with_sections() {
        let summaries = vec![CourseSummary {
            course: "ELC101".to_string(),
            terms: vec![breakdown("2020SP"), breakdown("2020FA")],
            grand_total: ModalityTally { enrollments: 6, sections: 6 },
        }];
        let document = builder::build_document(&meta(), &summaries);

        let bytes = render(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_long_table_spills_onto_extra_pages() {
        // ~40 terms produce far more table rows than fit on one page.
        let terms: Vec<TermBreakdown> = (2000..2040)
            .map(|year| breakdown(&format!("{}FA", year)))
            .collect();
        let summaries = vec![CourseSummary {
            course: "ELC101".to_string(),
            grand_total: ModalityTally {
                enrollments: 3 * terms.len() as u32,
                sections: 3 * terms.len() as u32,
            },
            terms,
        }];
        let document = builder::build_document(&meta(), &summaries);

        let bytes = render(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text_respects_limit() {
        let wrapped = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);

        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
