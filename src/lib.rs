//! # datev-export
//!
//! DATEV EXTF export encoder: turns posted invoices and credit notes from an
//! accounting ledger into Buchungsstapel and Debitoren/Kreditoren CSV files,
//! packaged in a ZIP together with optional PDF attachments and a
//! `document.xml` manifest.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The ledger is reached through the [`core::Ledger`] trait, so the encoder
//! has no dependency on a particular accounting system.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datev_export::core::*;
//! use datev_export::export::DatevExporter;
//! use rust_decimal::Decimal;
//!
//! let settings = CompanySettingsBuilder::new(29098, 55003).account_length(4).build();
//! let customer = PartnerBuilder::new(1, "Kunde AG")
//!     .company()
//!     .vat_id("DE123456789")
//!     .receivable("10001")
//!     .build();
//! let invoice = InvoiceRecordBuilder::new(1, "RE-2024-001", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
//!     .due_date(NaiveDate::from_ymd_opt(2024, 4, 14).unwrap())
//!     .partner(customer)
//!     .add_line("8400", Decimal::new(10000, 2))
//!     .add_line("8300", Decimal::new(5000, 2))
//!     .build();
//! let ledger = InMemoryLedger::with_invoices(settings, vec![invoice]);
//!
//! let request = ExportRequest::buchungsstapel(Period::Month { year: 2024, month: 3 });
//! let archive = DatevExporter::new(&ledger).export(&request).unwrap();
//!
//! assert_eq!(archive.members.len(), 2); // Buchungsstapel + partner file
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `archive` (default) | ZIP packaging, `document.xml`, [`export::DatevExporter`] |
//!
//! Without `archive`, the [`core`] model and the [`datev`] CSV encoder are
//! still available.

pub mod core;

pub mod datev;

#[cfg(feature = "archive")]
pub mod export;

// Re-export core types at crate root for convenience
pub use crate::core::*;
