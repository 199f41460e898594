//! Archive and member file names.

use chrono::NaiveDate;

use crate::core::{DateRange, ExportMode};

const PREFIX: &str = "EXTF_datev_export";

/// Date part of the file names.
///
/// A range covering exactly one calendar month becomes `yyyy-MM`, any
/// other range `<start>_bis_<end>`. Exports without a range use `today`.
pub fn date_segment(range: Option<&DateRange>, today: NaiveDate) -> String {
    match range {
        Some(r) if r.is_full_month() => r.start.format("%Y-%m").to_string(),
        Some(r) => format!(
            "{}_bis_{}",
            r.start.format("%Y-%m-%d"),
            r.end.format("%Y-%m-%d")
        ),
        None => today.format("%Y-%m-%d").to_string(),
    }
}

/// Base name shared by the main CSV member and the archive.
pub fn base_name(mode: ExportMode, with_attachments: bool, segment: &str) -> String {
    let pdf = if with_attachments { "_PDF" } else { "" };
    format!("{PREFIX}_{}{pdf}_{segment}", mode.file_label())
}

/// Name of the partner file accompanying a Buchungsstapel.
pub fn companion_name(segment: &str) -> String {
    format!(
        "{PREFIX}_{}_{}_{segment}.csv",
        ExportMode::DebitorenKreditoren.file_label(),
        ExportMode::Buchungsstapel.file_label()
    )
}
