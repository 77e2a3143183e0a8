//! PDF snapshot report.
//!
//! A report is one fresh reading laid out on a single A4 page: a centered
//! bold title carrying the date, then one `"<label>: <value>"` line per
//! field in canonical order. [`ReportDocument`] holds the text layout;
//! [`ReportDocument::to_pdf`] encodes it.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::generator::generate;
use crate::model::Reading;

const TITLE_PREFIX: &str = "Smart Substation Report";

// A4 page with a 10 mm margin and 10 mm rows.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const ROW_HEIGHT_MM: f32 = 10.0;
const TITLE_SIZE_PT: f32 = 16.0;
const BODY_SIZE_PT: f32 = 12.0;
const PT_TO_MM: f32 = 0.352_778;
// Mean glyph advance of Helvetica Bold, in ems.
const BOLD_EM_ADVANCE: f32 = 0.58;

/// `Substation_Report_<YYYY-MM-DD>.pdf`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Substation_Report_{date}.pdf")
}

/// Draw one fresh reading and encode it as a PDF.
pub fn generate_report(date: NaiveDate) -> Result<Vec<u8>, CoreError> {
    ReportDocument::new(date, &generate()).to_pdf()
}

/// Generate a report and write it into `dir`, creating the directory if
/// needed. Returns the path of the written file.
pub fn write_report(dir: &Path, date: NaiveDate) -> Result<PathBuf, CoreError> {
    let bytes = generate_report(date)?;
    let path = dir.join(report_file_name(date));

    std::fs::create_dir_all(dir).map_err(|source| CoreError::ReportWrite {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, &bytes).map_err(|source| CoreError::ReportWrite {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(path)
}

/// Text layout of a report: one title line plus one line per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    title: String,
    field_lines: Vec<String>,
}

impl ReportDocument {
    pub fn new(date: NaiveDate, reading: &Reading) -> Self {
        Self {
            title: format!("{TITLE_PREFIX} - {date}"),
            field_lines: reading
                .fields()
                .map(|(field, value)| format!("{field}: {value}"))
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn field_lines(&self) -> &[String] {
        &self.field_lines
    }

    /// Every content line, title first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.field_lines.iter().map(String::as_str))
    }

    /// Encode as a single-page PDF.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn to_pdf(&self) -> Result<Vec<u8>, CoreError> {
        let (doc, page, layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Report",
        );
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CoreError::Pdf(e.to_string()))?;
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CoreError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        // PDF origin is bottom-left; rows are laid out top-down.
        let usable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let title_width =
            self.title.chars().count() as f32 * TITLE_SIZE_PT * PT_TO_MM * BOLD_EM_ADVANCE;
        let title_x = MARGIN_MM + ((usable_width - title_width) / 2.0).max(0.0);
        let mut baseline = PAGE_HEIGHT_MM - MARGIN_MM - ROW_HEIGHT_MM * 0.7;
        layer.use_text(
            self.title.as_str(),
            TITLE_SIZE_PT,
            Mm(title_x),
            Mm(baseline),
            &bold,
        );

        // One blank row after the title.
        baseline -= ROW_HEIGHT_MM * 2.0;
        for line in &self.field_lines {
            layer.use_text(line.as_str(), BODY_SIZE_PT, Mm(MARGIN_MM), Mm(baseline), &regular);
            baseline -= ROW_HEIGHT_MM;
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| CoreError::Pdf(e.to_string()))?;
        debug!(title = %self.title, bytes = bytes.len(), "report encoded");
        Ok(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 11).unwrap()
    }

    fn reading() -> Reading {
        Reading {
            grid_voltage_kv: 233,
            load_current_a: 175,
            power_factor: 0.87,
            transformer_temp_c: 77,
            frequency_hz: 50.12,
            line_loss_pct: 4.25,
            battery_status_pct: 91,
        }
    }

    #[test]
    fn document_has_title_and_seven_field_lines() {
        let doc = ReportDocument::new(date(), &reading());
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Smart Substation Report - 2025-02-11",
                "Grid Voltage (kV): 233",
                "Load Current (A): 175",
                "Power Factor: 0.87",
                "Transformer Temp (°C): 77",
                "Frequency (Hz): 50.12",
                "Line Loss (%): 4.25",
                "Battery Status (%): 91",
            ]
        );
    }

    #[test]
    fn title_embeds_date_verbatim() {
        let doc = ReportDocument::new(date(), &reading());
        assert!(doc.title().ends_with("2025-02-11"));
        assert_eq!(doc.field_lines().len(), 7);
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(report_file_name(date()), "Substation_Report_2025-02-11.pdf");
    }

    #[test]
    fn generated_report_is_a_pdf() {
        let bytes = generate_report(date()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_report_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");
        let path = write_report(&dir, date()).unwrap();
        assert_eq!(path, dir.join("Substation_Report_2025-02-11.pdf"));
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn write_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let err = write_report(&blocker, date()).unwrap_err();
        assert!(matches!(err, CoreError::ReportWrite { .. }));
    }
}
