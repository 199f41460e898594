//! DATEV export archive assembly.
//!
//! Runs the full pipeline for one [`ExportRequest`]: select invoices from a
//! [`Ledger`], render the EXTF CSV files, optionally embed attachments with a
//! `document.xml` manifest, and package everything into a ZIP.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datev_export::core::*;
//! use datev_export::export::DatevExporter;
//! use rust_decimal::Decimal;
//!
//! let customer = PartnerBuilder::new(7, "Kunde AG").company().receivable("10007").build();
//! let ledger = InMemoryLedger::with_invoices(
//!     CompanySettingsBuilder::new(29098, 55003).account_length(4).build(),
//!     vec![InvoiceRecordBuilder::new(1, "RE-2024-001", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
//!         .partner(customer)
//!         .add_line("8400", Decimal::new(10000, 2))
//!         .build()],
//! );
//!
//! let request = ExportRequest::buchungsstapel(Period::Month { year: 2024, month: 3 });
//! let archive = DatevExporter::new(&ledger).export(&request).unwrap();
//! assert_eq!(archive.file_name, "EXTF_datev_export_Buchungsstapel_2024-03.zip");
//! ```

mod archive;
mod filename;
mod manifest;
mod selector;

pub use archive::ArchiveWriter;
pub use filename::{base_name, companion_name, date_segment};
pub use manifest::{DocumentEntry, generate_document_xml};
pub use selector::{build_query, select_invoices};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::core::{DatevError, ExportMode, ExportRequest, InvoiceRecord, Ledger};
use crate::datev::{
    ExtfContext, companion_partners, select_partners, to_buchungsstapel, to_debitoren_kreditoren,
};

/// Name of the attachment manifest inside the archive.
pub const DOCUMENT_XML: &str = "document.xml";

/// A finished export: ZIP bytes plus naming metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArchive {
    /// Suggested download name, e.g. `EXTF_datev_export_Buchungsstapel_2024-03.zip`.
    pub file_name: String,
    /// Member names in the order they were written.
    pub members: Vec<String>,
    /// ZIP content.
    pub bytes: Vec<u8>,
}

/// Runs DATEV exports against a ledger.
pub struct DatevExporter<'a, L: Ledger + ?Sized> {
    ledger: &'a L,
    generated_at: Option<NaiveDateTime>,
}

impl<'a, L: Ledger + ?Sized> DatevExporter<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            generated_at: None,
        }
    }

    /// Fix the generation timestamp instead of using the local clock.
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Run one export.
    ///
    /// The request is validated before the ledger is queried. Nothing is
    /// returned unless the whole archive was built.
    pub fn export(&self, request: &ExportRequest) -> Result<ExportArchive, DatevError> {
        let range = request.resolve_range()?;
        let invoices = select_invoices(self.ledger, request, range)?;
        let settings = self.ledger.company_settings();
        let now = self
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());

        let ctx = ExtfContext {
            settings: &settings,
            range,
            created_at: now,
            partner_accounts: request.partner_accounts,
        };

        let archive = match request.mode {
            ExportMode::Buchungsstapel => self.export_buchungsstapel(request, &invoices, &ctx)?,
            ExportMode::DebitorenKreditoren => {
                self.export_debitoren_kreditoren(request, &invoices, &ctx)?
            }
        };

        info!(
            file = %archive.file_name,
            invoices = invoices.len(),
            members = archive.members.len(),
            "DATEV export finished"
        );
        Ok(archive)
    }

    fn export_buchungsstapel(
        &self,
        request: &ExportRequest,
        invoices: &[InvoiceRecord],
        ctx: &ExtfContext<'_>,
    ) -> Result<ExportArchive, DatevError> {
        let segment = date_segment(ctx.range.as_ref(), ctx.created_at.date());
        let base = base_name(
            ExportMode::Buchungsstapel,
            request.include_attachments,
            &segment,
        );

        let mut zip = ArchiveWriter::new();
        zip.add(&format!("{base}.csv"), to_buchungsstapel(invoices, ctx)?.as_bytes())?;

        // The accompanying partner file always lists companies only.
        let partners = companion_partners(invoices);
        if !partners.is_empty() {
            let csv = to_debitoren_kreditoren(&partners, ctx)?;
            zip.add(&companion_name(&segment), csv.as_bytes())?;
        }

        if request.include_attachments {
            zip.reserve(DOCUMENT_XML);
            let mut documents = Vec::new();
            for inv in invoices {
                let Some(attachment) = &inv.attachment else {
                    continue;
                };
                let file_name = zip.add(&attachment.file_name, &attachment.data)?;
                documents.push(DocumentEntry {
                    guid: inv.document_guid(),
                    file_name,
                    document_type: inv.category.document_type(),
                });
            }
            if !documents.is_empty() {
                let xml = generate_document_xml(&documents, ctx.created_at)?;
                zip.add_reserved(DOCUMENT_XML, xml.as_bytes())?;
            }
        }

        let (bytes, members) = zip.finish()?;
        Ok(ExportArchive {
            file_name: format!("{base}.zip"),
            members,
            bytes,
        })
    }

    fn export_debitoren_kreditoren(
        &self,
        request: &ExportRequest,
        invoices: &[InvoiceRecord],
        ctx: &ExtfContext<'_>,
    ) -> Result<ExportArchive, DatevError> {
        let partners = select_partners(invoices, request.company_only);
        if partners.is_empty() {
            let scope = if request.company_only {
                "company partners"
            } else {
                "partners"
            };
            return Err(DatevError::NoPartnersFound {
                criteria: format!("{scope} of {} selected invoices", invoices.len()),
            });
        }

        let segment = date_segment(None, ctx.created_at.date());
        let base = base_name(ExportMode::DebitorenKreditoren, false, &segment);

        let csv = to_debitoren_kreditoren(&partners, ctx)?;

        let mut zip = ArchiveWriter::new();
        zip.add(&format!("{base}.csv"), csv.as_bytes())?;
        let (bytes, members) = zip.finish()?;
        Ok(ExportArchive {
            file_name: format!("{base}.zip"),
            members,
            bytes,
        })
    }
}
