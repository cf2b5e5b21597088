//! PDF report exporter - Table → paginated grid document

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};
use tracing::debug;

use super::layout::{ReportLayout, GRID_LINE_PT, MARGIN_MM, PT_TO_MM};
use crate::error::{SheetError, SheetResult};
use crate::types::Table;

const DOCUMENT_TITLE: &str = "Updated table";
/// Header row shade (light grey, #D3D3D3)
const HEADER_SHADE: f32 = 211.0 / 255.0;

/// PDF exporter for the current table
pub struct ReportExporter<'a> {
    table: &'a Table,
    layout: ReportLayout,
}

impl<'a> ReportExporter<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            layout: ReportLayout::for_table(table),
        }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Render every page and serialize the document
    pub fn to_bytes(&self) -> SheetResult<Vec<u8>> {
        let layout = &self.layout;
        let width = Mm(layout.page_width_mm);
        let height = Mm(layout.page_height_mm);

        let (doc, first_page, first_layer) = PdfDocument::new(DOCUMENT_TITLE, width, height, "Table");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SheetError::Export(format!("Failed to load report font: {:?}", e)))?;

        let pages = layout.pages(self.table.row_count());
        let mut first = Some((first_page, first_layer));
        for rows in &pages {
            let (page, layer) = match first.take() {
                Some(indices) => indices,
                None => doc.add_page(width, height, "Table"),
            };
            let canvas = doc.get_page(page).get_layer(layer);
            self.draw_page(&canvas, &font, rows.clone());
        }

        debug!(
            pages = pages.len(),
            rows = self.table.row_count(),
            font_size = layout.font_size_pt,
            "Report rendered"
        );

        doc.save_to_bytes()
            .map_err(|e| SheetError::Export(format!("Failed to serialize report: {:?}", e)))
    }

    fn draw_page(&self, canvas: &PdfLayerReference, font: &IndirectFontRef, rows: std::ops::Range<usize>) {
        let layout = &self.layout;
        let left = MARGIN_MM;
        let top = layout.page_height_mm - MARGIN_MM;
        let table_width = layout.column_width_mm * layout.columns as f32;
        let row_count = rows.len() + 1;
        let bottom = top - layout.row_height_mm * row_count as f32;

        // Header background goes down first so grid and text sit on top of it
        canvas.set_fill_color(grey(HEADER_SHADE));
        canvas.add_rect(
            Rect::new(
                Mm(left),
                Mm(top - layout.row_height_mm),
                Mm(left + table_width),
                Mm(top),
            )
            .with_mode(PaintMode::Fill),
        );

        canvas.set_outline_color(grey(0.0));
        canvas.set_outline_thickness(GRID_LINE_PT);
        for i in 0..=row_count {
            let y = top - layout.row_height_mm * i as f32;
            canvas.add_line(segment(left, y, left + table_width, y));
        }
        for c in 0..=layout.columns {
            let x = left + layout.column_width_mm * c as f32;
            canvas.add_line(segment(x, top, x, bottom));
        }

        canvas.set_fill_color(grey(0.0));
        let header = self.table.columns().iter().map(|name| layout.fit(name));
        self.draw_row(canvas, font, 0, header);
        for (offset, row_idx) in rows.enumerate() {
            let cells = self.table.rows()[row_idx]
                .iter()
                .map(|cell| layout.cell_text(cell));
            self.draw_row(canvas, font, offset + 1, cells);
        }
    }

    fn draw_row(
        &self,
        canvas: &PdfLayerReference,
        font: &IndirectFontRef,
        slot: usize,
        cells: impl Iterator<Item = String>,
    ) {
        let layout = &self.layout;
        let row_bottom = layout.page_height_mm - MARGIN_MM - layout.row_height_mm * (slot + 1) as f32;
        // Baseline sits roughly centred for Helvetica's cap height
        let baseline = row_bottom + (layout.row_height_mm - layout.font_size_pt * 0.7 * PT_TO_MM) / 2.0;
        let padding = super::layout::CELL_PADDING_PT * PT_TO_MM;

        for (col, text) in cells.enumerate() {
            if text.is_empty() {
                continue;
            }
            let x = MARGIN_MM + layout.column_width_mm * col as f32 + padding;
            canvas.use_text(text, layout.font_size_pt, Mm(x), Mm(baseline), font);
        }
    }
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn segment(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
        ],
        is_closed: false,
    }
}
