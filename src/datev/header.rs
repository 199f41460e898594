//! EXTF header record (line 1 of every DATEV file).

use chrono::{Datelike, NaiveDateTime};

use super::columns::FORMAT_VERSION;
use super::format::compact_date;
use crate::core::{CompanySettings, DateRange, ExportMode};

/// Number of cells in the EXTF v700 header.
pub const HEADER_WIDTH: usize = 31;

/// Inputs of the EXTF header record.
#[derive(Debug, Clone)]
pub struct ExtfHeader<'a> {
    /// Format category of the file.
    pub mode: ExportMode,
    /// Creation timestamp (Erzeugt am).
    pub created_at: NaiveDateTime,
    /// Company configuration.
    pub settings: &'a CompanySettings,
    /// Export period, if the export has one.
    pub range: Option<DateRange>,
}

impl ExtfHeader<'_> {
    /// Render the header cells.
    ///
    /// The fiscal year start is derived from the period start; the period
    /// itself is only written for Buchungsstapel files.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![String::new(); HEADER_WIDTH];

        cells[0] = "\"EXTF\"".into();
        cells[1] = FORMAT_VERSION.to_string();
        cells[2] = self.mode.code().into();
        cells[3] = self.mode.label().into();
        cells[4] = self.mode.record_type().into();
        cells[5] = self.created_at.format("%Y%m%d%H%M%S%3f").to_string();

        cells[10] = optional(self.settings.consultant_number);
        cells[11] = optional(self.settings.client_number);
        if let Some(range) = &self.range {
            cells[12] = format!("{:04}0101", range.start.year());
        }
        cells[13] = optional(self.settings.account_length);
        if let (ExportMode::Buchungsstapel, Some(range)) = (self.mode, &self.range) {
            cells[14] = compact_date(range.start);
            cells[15] = compact_date(range.end);
        }

        // Festschreibung
        cells[20] = "0".into();
        cells[21] = self.settings.currency_code.clone();

        cells
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
