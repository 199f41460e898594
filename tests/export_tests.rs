#![cfg(feature = "archive")]

use std::cell::Cell;
use std::io::{Cursor, Read};

use chrono::{NaiveDate, NaiveDateTime};
use datev_export::core::*;
use datev_export::datev::booking_field;
use datev_export::export::*;
use rust_decimal_macros::dec;
use zip::ZipArchive;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn generated() -> NaiveDateTime {
    date(2024, 4, 2).and_hms_opt(9, 30, 15).unwrap()
}

fn settings() -> CompanySettings {
    CompanySettingsBuilder::new(29098, 55003)
        .account_length(4)
        .build()
}

fn kunde_ag() -> PartnerRecord {
    PartnerBuilder::new(1, "Kunde AG")
        .company()
        .vat_id("DE123456789")
        .receivable("10001")
        .build()
}

fn max_mustermann() -> PartnerRecord {
    PartnerBuilder::new(2, "Max Mustermann")
        .receivable("10002")
        .build()
}

fn invoice(id: u64, day: u32, partner: PartnerRecord) -> InvoiceRecord {
    InvoiceRecordBuilder::new(id, format!("RE-2024-{id:03}"), date(2024, 3, day))
        .due_date(date(2024, 4, 14))
        .partner(partner)
        .add_line("8400", dec!(100.00))
        .add_line("8300", dec!(50.00))
        .build()
}

fn march() -> ExportRequest {
    ExportRequest::buchungsstapel(Period::Month {
        year: 2024,
        month: 3,
    })
}

fn export(ledger: &InMemoryLedger, request: &ExportRequest) -> Result<ExportArchive, DatevError> {
    DatevExporter::new(ledger)
        .generated_at(generated())
        .export(request)
}

fn read_member(archive: &ExportArchive, name: &str) -> Vec<u8> {
    let mut zip = ZipArchive::new(Cursor::new(archive.bytes.as_slice())).unwrap();
    let mut file = zip.by_name(name).unwrap();
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).unwrap();
    buf
}

fn read_text(archive: &ExportArchive, name: &str) -> String {
    String::from_utf8(read_member(archive, name)).unwrap()
}

/// Ledger that counts how often it was queried.
struct CountingLedger {
    inner: InMemoryLedger,
    queries: Cell<usize>,
}

impl Ledger for CountingLedger {
    fn find_invoices(&self, query: &InvoiceQuery) -> Result<Vec<InvoiceRecord>, DatevError> {
        self.queries.set(self.queries.get() + 1);
        self.inner.find_invoices(query)
    }

    fn company_settings(&self) -> CompanySettings {
        self.inner.company_settings()
    }
}

/// Ledger whose backend is unavailable.
struct FailingLedger;

impl Ledger for FailingLedger {
    fn find_invoices(&self, _query: &InvoiceQuery) -> Result<Vec<InvoiceRecord>, DatevError> {
        Err(DatevError::Ledger("connection refused".into()))
    }

    fn company_settings(&self) -> CompanySettings {
        CompanySettings::default()
    }
}

// ---------------------------------------------------------------------------
// Buchungsstapel Export Tests
// ---------------------------------------------------------------------------

#[test]
fn buchungsstapel_month_export() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]);
    let archive = export(&ledger, &march()).unwrap();

    assert_eq!(archive.file_name, "EXTF_datev_export_Buchungsstapel_2024-03.zip");
    assert_eq!(
        archive.members,
        vec![
            "EXTF_datev_export_Buchungsstapel_2024-03.csv",
            "EXTF_datev_export_Debitoren_Kreditoren_Buchungsstapel_2024-03.csv",
        ]
    );

    let csv = read_text(&archive, &archive.members[0]);
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("\"EXTF\";700;21;Buchungsstapel;13;20240402093015000;"));
    assert!(lines[2].starts_with("100,00;H;EUR;;;;8400;10001;;1503;RE-2024-001;140424;;Kunde AG;"));
    assert!(lines[3].starts_with("50,00;H;EUR;;;;8300;10001;;1503;RE-2024-001;140424;;Kunde AG;"));
}

#[test]
fn partial_range_file_name() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]);
    let request = ExportRequest::buchungsstapel(Period::Range {
        start: date(2024, 3, 5),
        end: date(2024, 3, 20),
    });
    let archive = export(&ledger, &request).unwrap();
    assert_eq!(
        archive.file_name,
        "EXTF_datev_export_Buchungsstapel_2024-03-05_bis_2024-03-20.zip"
    );
    assert_eq!(
        archive.members[0],
        "EXTF_datev_export_Buchungsstapel_2024-03-05_bis_2024-03-20.csv"
    );

    let csv = read_text(&archive, &archive.members[0]);
    let header = csv.split("\r\n").next().unwrap();
    assert!(header.contains(";20240101;4;20240305;20240320;"));
}

#[test]
fn companion_partner_file_lists_companies_with_account() {
    let ledger = InMemoryLedger::with_invoices(
        settings(),
        vec![
            invoice(1, 10, kunde_ag()),
            invoice(2, 11, max_mustermann()),
            invoice(3, 12, kunde_ag()),
        ],
    );
    let archive = export(&ledger, &march()).unwrap();
    let csv = read_text(&archive, &archive.members[1]);
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"EXTF\";700;16;Debitoren/Kreditoren;5;"));
    assert!(lines[2].starts_with("10001;Kunde AG;;;;;2;;;DE123456789;"));
}

#[test]
fn no_companion_file_without_company_partner() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, max_mustermann())]);
    let archive = export(&ledger, &march()).unwrap();
    assert_eq!(archive.members, vec!["EXTF_datev_export_Buchungsstapel_2024-03.csv"]);
}

#[test]
fn only_posted_invoices_in_range_are_exported() {
    let draft = InvoiceRecordBuilder::new(10, "ENTWURF", date(2024, 3, 10))
        .state(PostingState::Draft)
        .add_line("8400", dec!(1))
        .build();
    let april = InvoiceRecordBuilder::new(11, "RE-2024-011", date(2024, 4, 1))
        .add_line("8400", dec!(1))
        .build();
    let ledger = InMemoryLedger::with_invoices(
        settings(),
        vec![draft, april, invoice(1, 31, kunde_ag())],
    );
    let archive = export(&ledger, &march()).unwrap();
    let csv = read_text(&archive, &archive.members[0]);
    assert_eq!(csv.split_terminator("\r\n").count(), 4);
    assert!(!csv.contains("ENTWURF"));
    assert!(!csv.contains("RE-2024-011"));
}

#[test]
fn invoice_type_filter_limits_selection() {
    let note = InvoiceRecordBuilder::new(5, "GS-2024-005", date(2024, 3, 16))
        .credit_note()
        .add_line("8400", dec!(-20))
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag()), note]);

    let archive = export(
        &ledger,
        &march().invoice_types(InvoiceTypeFilter::CreditNotesOnly),
    )
    .unwrap();
    let csv = read_text(&archive, &archive.members[0]);
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("20,00;S;EUR;"));
    assert_eq!(archive.members.len(), 1);
}

#[test]
fn rows_are_ordered_by_date() {
    let ledger = InMemoryLedger::with_invoices(
        settings(),
        vec![invoice(2, 20, kunde_ag()), invoice(1, 5, kunde_ag())],
    );
    let archive = export(&ledger, &march()).unwrap();
    let csv = read_text(&archive, &archive.members[0]);
    let numbers: Vec<String> = csv
        .split_terminator("\r\n")
        .skip(2)
        .map(|l| l.split(';').nth(booking_field::DOCUMENT_NUMBER).unwrap().to_string())
        .collect();
    assert_eq!(
        numbers,
        ["RE-2024-001", "RE-2024-001", "RE-2024-002", "RE-2024-002"]
    );
}

// ---------------------------------------------------------------------------
// Attachment Tests
// ---------------------------------------------------------------------------

#[test]
fn attachments_and_document_xml() {
    let with_pdf = InvoiceRecordBuilder::new(1, "RE-2024-001", date(2024, 3, 15))
        .partner(kunde_ag())
        .add_line("8400", dec!(100))
        .attachment("RE-2024-001.pdf", b"%PDF-1.4 one".to_vec())
        .build();
    let guid = with_pdf.document_guid();
    let without_pdf = InvoiceRecordBuilder::new(2, "RE-2024-002", date(2024, 3, 16))
        .add_line("8400", dec!(50))
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![with_pdf, without_pdf]);

    let archive = export(&ledger, &march().include_attachments(true)).unwrap();
    assert_eq!(
        archive.file_name,
        "EXTF_datev_export_Buchungsstapel_PDF_2024-03.zip"
    );
    assert_eq!(
        archive.members,
        vec![
            "EXTF_datev_export_Buchungsstapel_PDF_2024-03.csv",
            "EXTF_datev_export_Debitoren_Kreditoren_Buchungsstapel_2024-03.csv",
            "RE-2024-001.pdf",
            DOCUMENT_XML,
        ]
    );
    assert_eq!(read_member(&archive, "RE-2024-001.pdf"), b"%PDF-1.4 one");

    let xml = read_text(&archive, DOCUMENT_XML);
    assert_eq!(xml.matches("<Document>").count(), 1);
    assert!(xml.contains(&format!("<GUID>{guid}</GUID>")));
    assert!(xml.contains("<Filename>RE-2024-001.pdf</Filename>"));
    assert!(xml.contains("<DocumentType>2</DocumentType>"));
    assert!(xml.contains("<DateCreated>2024-04-02T09:30:15</DateCreated>"));

    let csv = read_text(&archive, &archive.members[0]);
    assert!(csv.contains(&format!(";BEDI \"{guid}\";")));
}

#[test]
fn attachments_flag_without_pdfs_adds_no_manifest() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]);
    let archive = export(&ledger, &march().include_attachments(true)).unwrap();
    assert!(!archive.members.iter().any(|m| m == DOCUMENT_XML));
    assert_eq!(archive.members.len(), 2);
}

#[test]
fn attachments_ignored_when_not_requested() {
    let inv = InvoiceRecordBuilder::new(1, "RE-2024-001", date(2024, 3, 15))
        .add_line("8400", dec!(1))
        .attachment("RE-2024-001.pdf", b"%PDF".to_vec())
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![inv]);
    let archive = export(&ledger, &march()).unwrap();
    assert_eq!(archive.members.len(), 1);
}

#[test]
fn duplicate_attachment_names_are_renamed() {
    let a = InvoiceRecordBuilder::new(1, "RE-1", date(2024, 3, 1))
        .add_line("8400", dec!(1))
        .category(DocumentCategory::Purchase)
        .attachment("scan.pdf", b"A".to_vec())
        .build();
    let b = InvoiceRecordBuilder::new(2, "RE-2", date(2024, 3, 2))
        .add_line("8400", dec!(1))
        .category(DocumentCategory::Purchase)
        .attachment("scan.pdf", b"B".to_vec())
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![a, b]);
    let archive = export(&ledger, &march().include_attachments(true)).unwrap();

    assert_eq!(read_member(&archive, "scan.pdf"), b"A");
    assert_eq!(read_member(&archive, "scan_2.pdf"), b"B");
    let xml = read_text(&archive, DOCUMENT_XML);
    assert!(xml.contains("<Filename>scan_2.pdf</Filename>"));
    assert_eq!(xml.matches("<DocumentType>1</DocumentType>").count(), 2);
}

#[test]
fn attachment_named_like_manifest_is_renamed() {
    let inv = InvoiceRecordBuilder::new(1, "RE-1", date(2024, 3, 1))
        .add_line("8400", dec!(1))
        .attachment(DOCUMENT_XML, b"%PDF".to_vec())
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![inv]);
    let archive = export(&ledger, &march().include_attachments(true)).unwrap();

    assert_eq!(
        archive.members,
        vec![
            "EXTF_datev_export_Buchungsstapel_PDF_2024-03.csv",
            "document_2.xml",
            DOCUMENT_XML,
        ]
    );
    assert_eq!(read_member(&archive, "document_2.xml"), b"%PDF");
    let xml = read_text(&archive, DOCUMENT_XML);
    assert!(xml.contains("<DocumentList"));
    assert!(xml.contains("<Filename>document_2.xml</Filename>"));
}

// ---------------------------------------------------------------------------
// Debitoren/Kreditoren Export Tests
// ---------------------------------------------------------------------------

#[test]
fn partner_export_deduplicates() {
    let ledger = InMemoryLedger::with_invoices(
        settings(),
        vec![
            invoice(1, 1, kunde_ag()),
            invoice(2, 2, kunde_ag()),
            invoice(3, 3, kunde_ag()),
        ],
    );
    let archive = export(&ledger, &ExportRequest::debitoren_kreditoren()).unwrap();
    assert_eq!(
        archive.file_name,
        "EXTF_datev_export_Debitoren_Kreditoren_2024-04-02.zip"
    );
    assert_eq!(
        archive.members,
        vec!["EXTF_datev_export_Debitoren_Kreditoren_2024-04-02.csv"]
    );
    let csv = read_text(&archive, &archive.members[0]);
    assert_eq!(csv.split_terminator("\r\n").count(), 3);
}

#[test]
fn partner_export_ignores_period() {
    let old = InvoiceRecordBuilder::new(1, "RE-2019-001", date(2019, 6, 1))
        .partner(kunde_ag())
        .add_line("8400", dec!(1))
        .build();
    let ledger = InMemoryLedger::with_invoices(settings(), vec![old]);
    let mut request = ExportRequest::debitoren_kreditoren();
    request.period = Some(Period::Month {
        year: 2024,
        month: 3,
    });
    let archive = export(&ledger, &request).unwrap();
    assert_eq!(archive.members.len(), 1);
}

#[test]
fn partner_export_company_only_without_companies() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 1, max_mustermann())]);
    let err = export(&ledger, &ExportRequest::debitoren_kreditoren()).unwrap_err();
    assert!(matches!(err, DatevError::NoPartnersFound { .. }));
    assert!(err.is_empty_result());
}

#[test]
fn partner_export_including_individuals() {
    let ledger = InMemoryLedger::with_invoices(
        settings(),
        vec![invoice(1, 1, max_mustermann()), invoice(2, 2, kunde_ag())],
    );
    let request = ExportRequest::debitoren_kreditoren().company_only(false);
    let archive = export(&ledger, &request).unwrap();
    let csv = read_text(&archive, &archive.members[0]);
    let lines: Vec<&str> = csv.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("10002;;;Max Mustermann;;;1;"));
    assert!(lines[3].starts_with("10001;Kunde AG;;;;;2;"));
}

// ---------------------------------------------------------------------------
// Error Tests
// ---------------------------------------------------------------------------

#[test]
fn missing_period_fails_before_query() {
    let ledger = CountingLedger {
        inner: InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]),
        queries: Cell::new(0),
    };
    let mut request = march();
    request.period = None;
    let err = DatevExporter::new(&ledger).export(&request).unwrap_err();
    assert!(matches!(err, DatevError::Validation(_)));
    assert_eq!(ledger.queries.get(), 0);
}

#[test]
fn inverted_range_fails_before_query() {
    let ledger = CountingLedger {
        inner: InMemoryLedger::new(settings()),
        queries: Cell::new(0),
    };
    let request = ExportRequest::buchungsstapel(Period::Range {
        start: date(2024, 3, 31),
        end: date(2024, 3, 1),
    });
    let err = DatevExporter::new(&ledger).export(&request).unwrap_err();
    assert!(matches!(err, DatevError::Validation(_)));
    assert_eq!(ledger.queries.get(), 0);
}

#[test]
fn empty_selection_reports_criteria() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]);
    let request = ExportRequest::buchungsstapel(Period::Month {
        year: 2024,
        month: 5,
    });
    let err = export(&ledger, &request).unwrap_err();
    match &err {
        DatevError::NoRecordsFound { criteria } => {
            assert!(criteria.contains("2024-05-01 bis 2024-05-31"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_empty_result());
}

#[test]
fn ledger_failure_is_propagated() {
    let err = DatevExporter::new(&FailingLedger)
        .export(&march())
        .unwrap_err();
    assert!(matches!(err, DatevError::Ledger(_)));
    assert!(!err.is_empty_result());
}

#[test]
fn exporter_works_through_trait_object() {
    let ledger = InMemoryLedger::with_invoices(settings(), vec![invoice(1, 15, kunde_ag())]);
    let dynamic: &dyn Ledger = &ledger;
    let archive = DatevExporter::new(dynamic)
        .generated_at(generated())
        .export(&march())
        .unwrap();
    assert_eq!(&archive.bytes[0..2], b"PK");
}
