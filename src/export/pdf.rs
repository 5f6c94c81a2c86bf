//! PDF backend built on printpdf
//!
//! Writes the layout block by block with the built-in Helvetica faces, top
//! to bottom, starting a new page of the same format when the current one is
//! full. Text is measured with the Helvetica metrics and wrapped, never cut.
//! Coordinates are millimetres from the bottom-left corner.

use super::{export_filename, ExportSettings, ExportedFile, Exporter};
use crate::error::ExportError;
use crate::render::{Field, ReceiptLayout, RowKind};
use printpdf::lopdf::{self, Object, StringFormat};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, OffsetDateTime, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

/// Points to millimetres
const PT_TO_MM: f32 = 0.352_778;

const TITLE_PT: f32 = 16.0;
const SECTION_PT: f32 = 12.0;
const BODY_PT: f32 = 9.5;
const SMALL_PT: f32 = 8.5;

/// Horizontal offset of values inside a label/value pair
const VALUE_OFFSET_MM: f32 = 32.0;

/// Space kept clear between the two columns of the identity grid
const COLUMN_GAP_MM: f32 = 2.0;

const LAYER_NAME: &str = "Receipt";

// ─────────────────────────────────────────────────────────────────────────────
// Font metrics
// ─────────────────────────────────────────────────────────────────────────────

/// Helvetica advance widths for ' '..='~', in thousandths of an em
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ' '..='~', in thousandths of an em
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Widest glyph in the Latin-1 range, used for anything outside ASCII
const WIDEST_GLYPH: u16 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
}

impl Face {
    fn bold(bold: bool) -> Self {
        if bold {
            Self::Bold
        } else {
            Self::Regular
        }
    }

    /// Advance width of `c` in thousandths of an em
    fn advance(self, c: char) -> u16 {
        let table = match self {
            Self::Regular => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - ' ' as usize],
            _ => WIDEST_GLYPH,
        }
    }
}

/// Printed width of `s` in millimetres
fn text_width_mm(s: &str, size: f32, face: Face) -> f32 {
    let units: u32 = pdf_text(s).chars().map(|c| u32::from(face.advance(c))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

// ─────────────────────────────────────────────────────────────────────────────
// Exporter
// ─────────────────────────────────────────────────────────────────────────────

/// Exports receipts as PDF documents
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    settings: ExportSettings,
}

impl PdfExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for PdfExporter {
    fn export(
        &self,
        layout: &ReceiptLayout,
        admission_no: &str,
    ) -> Result<ExportedFile, ExportError> {
        let filename = export_filename(admission_no);
        tracing::debug!(
            "Exporting {} ({}, margin {}in, scale {})",
            filename,
            self.settings.page_format.as_str(),
            self.settings.margin_in,
            self.settings.scale
        );

        // Fixed metadata dates so the same receipt always yields the same bytes
        let (width, height) = self.settings.page_format.size_mm();
        let (doc, page, layer) =
            PdfDocument::new(filename.as_str(), Mm(width), Mm(height), LAYER_NAME);
        let doc = doc
            .with_creation_date(OffsetDateTime::UNIX_EPOCH)
            .with_mod_date(OffsetDateTime::UNIX_EPOCH)
            .with_metadata_date(OffsetDateTime::UNIX_EPOCH);

        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = PageWriter {
            doc: &doc,
            layer,
            regular,
            bold,
            width,
            height,
            margin: self.settings.margin_mm(),
            y: height - self.settings.margin_mm(),
            pages: 1,
        };

        writer.header(layout);
        writer.identity_grid(&layout.identity);
        writer.fee_table(layout);
        writer.payment(&layout.payment);
        writer.clerk(layout);
        tracing::debug!("{} laid out on {} page(s)", filename, writer.pages);

        let bytes = pin_trailer_id(&doc.save_to_bytes()?, &document_id(admission_no))?;
        Ok(ExportedFile { filename, bytes })
    }
}

/// Stable trailer ID for a receipt: the admission number in hex
fn document_id(admission_no: &str) -> String {
    let hex: String = admission_no.bytes().map(|b| format!("{:02x}", b)).collect();
    format!("{:0>32}", hex)
}

/// printpdf stamps every save with a random instance ID. Replace both
/// halves of the trailer ID with `id`.
fn pin_trailer_id(bytes: &[u8], id: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = lopdf::Document::load_mem(bytes)?;
    let id = Object::String(id.as_bytes().to_vec(), StringFormat::Literal);
    doc.trailer.set("ID", Object::Array(vec![id.clone(), id]));

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

/// Cursor over the pages of one document
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    margin: f32,
    /// Baseline of the next line
    y: f32,
    pages: usize,
}

impl PageWriter<'_> {
    fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Room for a value in one column of the identity grid
    fn pair_value_width(content_width: f32) -> f32 {
        content_width / 2.0 - VALUE_OFFSET_MM - COLUMN_GAP_MM
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * 1.45
    }

    /// Start a new page if fewer than `needed` millimetres remain
    fn reserve(&mut self, needed: f32) {
        if self.y - needed >= self.margin {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(self.width), Mm(self.height), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.height - self.margin;
        self.pages += 1;
    }

    fn text(&self, s: &str, size: f32, x: f32, bold: bool) {
        debug_assert!(
            self.y >= self.margin,
            "baseline {} below bottom margin {}",
            self.y,
            self.margin
        );
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(pdf_text(s), size, Mm(x), Mm(self.y), font);
    }

    /// One line of text at `x`, moving to a new page first if needed
    fn line(&mut self, s: &str, size: f32, x: f32, bold: bool) {
        let h = Self::line_height(size);
        self.reserve(h);
        self.text(s, size, x, bold);
        self.y -= h;
    }

    /// `label` beside `value`, the value wrapped to `value_width`
    fn labelled(&mut self, label: &str, value: &str, value_width: f32, label_bold: bool) {
        let h = Self::line_height(BODY_PT);
        let value_bold = !label_bold;
        let lines = wrap(value, value_width, BODY_PT, Face::bold(value_bold));
        for (i, line) in lines.iter().enumerate() {
            self.reserve(h);
            if i == 0 {
                self.text(label, BODY_PT, self.margin, label_bold);
            }
            self.text(line, BODY_PT, self.margin + VALUE_OFFSET_MM, value_bold);
            self.y -= h;
        }
    }

    fn centered(&mut self, s: &str, size: f32, bold: bool) {
        let face = Face::bold(bold);
        for line in wrap(s, self.content_width(), size, face) {
            let x = self.margin
                + ((self.content_width() - text_width_mm(&line, size, face)) / 2.0).max(0.0);
            self.line(&line, size, x, bold);
        }
    }

    fn rule(&self, y: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(self.margin), Mm(y)), false),
                (Point::new(Mm(self.width - self.margin), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn header(&mut self, layout: &ReceiptLayout) {
        self.centered(&layout.header.institution, TITLE_PT, true);
        for line in &layout.header.address_lines {
            self.centered(line, SMALL_PT, false);
        }
        self.gap(4.0);
        self.centered(layout.header.title, SECTION_PT, true);
        self.gap(2.0);
    }

    /// Two label/value pairs per row; full-width fields take a row of their own
    fn identity_grid(&mut self, fields: &[Field]) {
        let mut pair: Vec<&Field> = Vec::with_capacity(2);

        for field in fields {
            if field.full_width {
                self.identity_row(&pair);
                pair.clear();
                let avail = self.content_width() - VALUE_OFFSET_MM;
                self.labelled(field.label, &field.value, avail, false);
                continue;
            }
            pair.push(field);
            if pair.len() == 2 {
                self.identity_row(&pair);
                pair.clear();
            }
        }
        self.identity_row(&pair);
        self.gap(3.0);
    }

    /// Up to two cells side by side; the row is as tall as its tallest value
    fn identity_row(&mut self, cells: &[&Field]) {
        if cells.is_empty() {
            return;
        }
        let h = Self::line_height(BODY_PT);
        let half = self.content_width() / 2.0;
        let avail = Self::pair_value_width(self.content_width());
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .map(|cell| wrap(&cell.value, avail, BODY_PT, Face::Bold))
            .collect();
        let rows = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for row in 0..rows {
            self.reserve(h);
            for (column, (cell, lines)) in cells.iter().zip(&wrapped).enumerate() {
                let x = self.margin + column as f32 * half;
                if row == 0 {
                    self.text(cell.label, BODY_PT, x, false);
                }
                if let Some(line) = lines.get(row) {
                    self.text(line, BODY_PT, x + VALUE_OFFSET_MM, true);
                }
            }
            self.y -= h;
        }
    }

    fn fee_table(&mut self, layout: &ReceiptLayout) {
        let h = Self::line_height(BODY_PT);
        let serial_x = self.margin + 2.0;
        let head_x = self.margin + 18.0;
        let amount_x = self.width - self.margin - 40.0;
        let head_width = amount_x - head_x - 4.0;
        // Rule sits between baselines
        let rule_offset = h * 0.7;

        self.reserve(h * 2.0);
        self.rule(self.y + rule_offset);
        let [serial, head, amount] = layout.fee_table.columns;
        self.text(serial, BODY_PT, serial_x, true);
        self.text(head, BODY_PT, head_x, true);
        self.text(amount, BODY_PT, amount_x, true);
        self.rule(self.y - h + rule_offset);
        self.y -= h;

        for row in &layout.fee_table.rows {
            let bold = row.kind == RowKind::Total;
            let lines = wrap(&row.head, head_width, BODY_PT, Face::bold(bold));
            for (i, line) in lines.iter().enumerate() {
                self.reserve(h);
                if i == 0 {
                    if bold {
                        self.rule(self.y + rule_offset);
                    }
                    self.text(&row.serial, BODY_PT, serial_x, false);
                    self.text(&row.amount, BODY_PT, amount_x, bold);
                }
                self.text(line, BODY_PT, head_x, bold);
                self.y -= h;
            }
        }
        self.rule(self.y + rule_offset);
        self.gap(4.0);
    }

    fn payment(&mut self, fields: &[Field]) {
        let avail = self.content_width() - VALUE_OFFSET_MM;
        for field in fields {
            self.labelled(&format!("{}:", field.label), &field.value, avail, true);
        }
        self.gap(8.0);
    }

    fn clerk(&mut self, layout: &ReceiptLayout) {
        let block_width = 45.0;
        let x = self.width - self.margin - block_width;
        let lines = wrap(&layout.clerk.name, block_width, BODY_PT, Face::Bold);
        // Keep a short signature block together
        self.reserve(Self::line_height(BODY_PT) * (lines.len() + 1).min(4) as f32);
        for line in &lines {
            self.line(line, BODY_PT, x, true);
        }
        self.line(layout.clerk.caption, BODY_PT, x, false);
    }
}

/// Map text onto what the built-in (WinAnsi) fonts can show.
///
/// The rupee sign has no WinAnsi code point, so it is spelled out.
pub(crate) fn pdf_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\t' => out.push(' '),
            c if (' '..='~').contains(&c) || ('\u{A0}'..='\u{FF}').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Greedy word wrap to `max_mm`. A word wider than a whole line is split
/// between characters. Always returns at least one line.
fn wrap(s: &str, max_mm: f32, size: f32, face: Face) -> Vec<String> {
    let fits = |t: &str| text_width_mm(t, size, face) <= max_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && !fits(&current) {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::receipt;
    use crate::model::{Amount, FeeItem};
    use crate::render::{render_receipt, Institution};

    fn a4_pair_width() -> f32 {
        let settings = ExportSettings::default();
        let (width, _) = settings.page_format.size_mm();
        PageWriter::pair_value_width(width - 2.0 * settings.margin_mm())
    }

    fn page_count(file: &ExportedFile) -> usize {
        lopdf::Document::load_mem(&file.bytes).unwrap().get_pages().len()
    }

    #[test]
    fn produces_pdf_named_after_admission() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let file = PdfExporter::default().export(&layout, "1001").unwrap();

        assert_eq!(file.filename, "1001.pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
        assert_eq!(page_count(&file), 1);
    }

    #[test]
    fn re_export_is_byte_identical() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let exporter = PdfExporter::default();

        let first = exporter.export(&layout, "1001").unwrap();
        let second = exporter.export(&layout, "1001").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn trailer_id_comes_from_admission_number() {
        let layout = render_receipt(&receipt("1001"), &Institution::default());
        let file = PdfExporter::default().export(&layout, "1001").unwrap();

        let doc = lopdf::Document::load_mem(&file.bytes).unwrap();
        let id: Vec<&[u8]> = doc
            .trailer
            .get(b"ID")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|part| part.as_str().unwrap())
            .collect();
        let expected = document_id("1001");
        assert_eq!(id, vec![expected.as_bytes(), expected.as_bytes()]);
        assert_eq!(document_id("1001"), "00000000000000000000000031303031");
    }

    #[test]
    fn long_receipts_spill_onto_more_pages() {
        let mut record = receipt("1001");
        record.fee_items = (1..=150)
            .map(|i| FeeItem {
                fee_head: format!("Installment {}", i),
                amount: Amount::from(10),
            })
            .collect();
        record.address = "Ward 7 ".repeat(60);

        let layout = render_receipt(&record, &Institution::default());
        let file = PdfExporter::new(ExportSettings {
            page_format: crate::export::PageFormat::Letter,
            ..ExportSettings::default()
        })
        .export(&layout, "1001")
        .unwrap();
        assert!(file.bytes.starts_with(b"%PDF"));
        assert!(page_count(&file) >= 2);
    }

    #[test]
    fn value_taller_than_a_page_continues_on_next_pages() {
        // Every line is checked against the bottom margin as it is written
        let mut record = receipt("1001");
        record.address = "Shahsatnamjipura Ward 7 Sirsa ".repeat(1500);

        let layout = render_receipt(&record, &Institution::default());
        let file = PdfExporter::default().export(&layout, "1001").unwrap();
        assert!(page_count(&file) >= 3);
    }

    #[test]
    fn long_uppercase_name_wraps_inside_its_column() {
        let name = "GURPREET KAUR D/O HARJINDER SINGH SANDHU";
        assert_eq!(name.chars().count(), 40);

        let avail = a4_pair_width();
        let lines = wrap(name, avail, BODY_PT, Face::Bold);

        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), name);
        for line in &lines {
            assert!(text_width_mm(line, BODY_PT, Face::Bold) <= avail, "{:?}", line);
        }
    }

    #[test]
    fn bold_caps_are_measured_at_real_width() {
        // 33 characters, wider than one column at 9.5pt Helvetica-Bold
        let name = "GURPREET KAUR D/O HARJINDER SINGH";
        assert!(text_width_mm(name, BODY_PT, Face::Bold) > a4_pair_width());
        assert!(
            text_width_mm(name, BODY_PT, Face::Bold) > text_width_mm(name, BODY_PT, Face::Regular)
        );
    }

    #[test]
    fn long_identity_and_fee_values_export_whole() {
        let mut record = receipt("1001");
        record.student_name = "GURPREET KAUR D/O HARJINDER SINGH SANDHU".to_string();
        record.father_name = "HARJINDER SINGH S/O LATE SARDAR KARTAR SINGH SANDHU".to_string();
        record.fee_items[0].fee_head =
            "Development and Maintenance Charges for Laboratory and Library Facilities"
                .to_string();

        let layout = render_receipt(&record, &Institution::default());
        let file = PdfExporter::default().export(&layout, "1001").unwrap();
        assert_eq!(page_count(&file), 1);
    }

    #[test]
    fn text_is_mapped_to_builtin_encoding() {
        assert_eq!(pdf_text("₹1500"), "Rs.1500");
        assert_eq!(pdf_text("Father’s Name"), "Father's Name");
        assert_eq!(pdf_text("Café"), "Café");
        assert_eq!(pdf_text("सिमरन"), "?????");
    }

    #[test]
    fn glyph_widths_follow_helvetica_metrics() {
        assert_eq!(Face::Regular.advance(' '), 278);
        assert_eq!(Face::Regular.advance('W'), 944);
        assert_eq!(Face::Regular.advance('i'), 222);
        assert_eq!(Face::Bold.advance('i'), 278);
        assert_eq!(Face::Bold.advance('~'), 584);
        assert_eq!(Face::Bold.advance('é'), WIDEST_GLYPH);
    }

    #[test]
    fn wrap_breaks_on_words() {
        let width = text_width_mm("Haryana", BODY_PT, Face::Regular);
        assert_eq!(wrap("", width, BODY_PT, Face::Regular), vec![String::new()]);
        assert_eq!(
            wrap("Ward 7 Sirsa Haryana", width, BODY_PT, Face::Regular),
            vec!["Ward 7", "Sirsa", "Haryana"]
        );
    }

    #[test]
    fn wrap_splits_words_wider_than_a_line() {
        let word = "Shahsatnamjipura";
        let width = text_width_mm("Shahs", BODY_PT, Face::Regular);
        let lines = wrap(word, width, BODY_PT, Face::Regular);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width_mm(line, BODY_PT, Face::Regular) <= width);
        }
    }
}
