//! DATEV EXTF record encoding.
//!
//! Generates Buchungsstapel (category 21) and Debitoren/Kreditoren
//! (category 16) CSV files: EXTF header, column label line and fixed-width
//! data rows.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datev_export::core::*;
//! use datev_export::datev::*;
//! use rust_decimal::Decimal;
//!
//! let settings = CompanySettingsBuilder::new(29098, 55003).account_length(4).build();
//! let invoice = InvoiceRecordBuilder::new(1, "RE-2024-001", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
//!     .add_line("8400", Decimal::new(10000, 2))
//!     .build();
//!
//! let ctx = ExtfContext {
//!     settings: &settings,
//!     range: Some(DateRange::month(2024, 3).unwrap()),
//!     created_at: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
//!     partner_accounts: PartnerAccountStrategy::ReceivableCode,
//! };
//! let csv = to_buchungsstapel(&[invoice], &ctx).unwrap();
//! assert!(csv.starts_with("\"EXTF\";700;21;Buchungsstapel;13;"));
//! ```

mod booking;
mod columns;
mod extf;
mod format;
mod header;
mod partner;
mod row;

pub use booking::{
    AccountGroup, BookingRecord, DEFAULT_REVENUE_ACCOUNT, DebitCredit, booking_rows,
    group_by_account, invoice_to_records,
};
pub use columns::{
    BUCHUNGSSTAPEL_COLUMNS_V700, BUCHUNGSSTAPEL_WIDTH, DEBITOREN_KREDITOREN_COLUMNS_V700,
    DEBITOREN_KREDITOREN_WIDTH, FORMAT_VERSION, booking_field, partner_field,
};
pub use extf::{ExtfContext, to_buchungsstapel, to_debitoren_kreditoren, write_document};
pub use format::{
    DOCUMENT_NUMBER_MAX, POSTING_TEXT_MAX, compact_date, document_date, due_date, format_amount,
    truncate,
};
pub use header::{ExtfHeader, HEADER_WIDTH};
pub use partner::{
    AddressType, PartnerMasterRecord, companion_partners, partner_account, partner_rows,
    select_partners, unique_partners,
};
pub use row::{DatevRow, RecordKind};
