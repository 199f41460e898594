//! DATEV EXTF CSV generation.

use chrono::NaiveDateTime;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::booking::booking_rows;
use super::header::ExtfHeader;
use super::partner::partner_rows;
use super::row::{DatevRow, RecordKind};
use crate::core::{
    CompanySettings, DateRange, DatevError, ExportMode, InvoiceRecord, PartnerAccountStrategy,
    PartnerRecord,
};

/// Shared inputs for rendering EXTF files.
#[derive(Debug, Clone, Copy)]
pub struct ExtfContext<'a> {
    /// Company configuration (header fields, account length).
    pub settings: &'a CompanySettings,
    /// Resolved export period.
    pub range: Option<DateRange>,
    /// Timestamp written to the header.
    pub created_at: NaiveDateTime,
    /// Partner account rendering.
    pub partner_accounts: PartnerAccountStrategy,
}

/// Generate a Buchungsstapel EXTF CSV from a set of invoices.
///
/// Line 1 is the EXTF header, line 2 the column labels, then one row per
/// invoice and revenue account. Returns the CSV as a UTF-8 string with CRLF
/// line endings.
pub fn to_buchungsstapel(
    invoices: &[InvoiceRecord],
    ctx: &ExtfContext<'_>,
) -> Result<String, DatevError> {
    let rows = booking_rows(
        invoices,
        ctx.partner_accounts,
        ctx.settings.account_length,
    );
    let header = ExtfHeader {
        mode: ExportMode::Buchungsstapel,
        created_at: ctx.created_at,
        settings: ctx.settings,
        range: ctx.range,
    };
    write_document(&header.cells(), RecordKind::Booking, &rows)
}

/// Generate a Debitoren/Kreditoren EXTF CSV for the given partners.
pub fn to_debitoren_kreditoren(
    partners: &[&PartnerRecord],
    ctx: &ExtfContext<'_>,
) -> Result<String, DatevError> {
    let rows = partner_rows(partners, ctx.partner_accounts, ctx.settings.account_length);
    let header = ExtfHeader {
        mode: ExportMode::DebitorenKreditoren,
        created_at: ctx.created_at,
        settings: ctx.settings,
        range: ctx.range,
    };
    write_document(&header.cells(), RecordKind::Partner, &rows)
}

/// Write header, column labels and data rows as one CSV document.
///
/// `;` separated, `'` quoted where needed, CRLF terminated. Records differ
/// in width (header vs. data), so the writer runs in flexible mode.
pub fn write_document(
    header: &[String],
    kind: RecordKind,
    rows: &[DatevRow],
) -> Result<String, DatevError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote(b'\'')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(header).map_err(csv_err)?;
    writer.write_record(kind.columns()).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DatevError::Csv(format!("flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| DatevError::Csv(format!("UTF-8 error: {e}")))
}

fn csv_err(e: csv::Error) -> DatevError {
    DatevError::Csv(e.to_string())
}
