//! Writes a March 2024 Buchungsstapel export to the current directory.
//!
//! Run with: `cargo run --example datev_export`

use chrono::NaiveDate;
use datev_export::core::*;
use datev_export::export::DatevExporter;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = CompanySettingsBuilder::new(29098, 55003)
        .account_length(4)
        .build();

    let kunde = PartnerBuilder::new(1, "Kunde AG")
        .company()
        .vat_id("DE123456789")
        .receivable("10001")
        .build();
    let privat = PartnerBuilder::new(2, "Max Mustermann")
        .receivable("10002")
        .build();

    let ledger = InMemoryLedger::with_invoices(
        settings,
        vec![
            InvoiceRecordBuilder::new(1, "RE-2024-001", date(2024, 3, 15))
                .due_date(date(2024, 4, 14))
                .partner(kunde.clone())
                .add_line("8400", Decimal::new(10000, 2))
                .add_line("8300", Decimal::new(5000, 2))
                .attachment("RE-2024-001.pdf", b"%PDF-1.4\n%demo\n".to_vec())
                .build(),
            InvoiceRecordBuilder::new(2, "RE-2024-002", date(2024, 3, 20))
                .partner(privat)
                .add_line("8400", Decimal::new(4999, 2))
                .build(),
            InvoiceRecordBuilder::new(3, "GS-2024-001", date(2024, 3, 28))
                .credit_note()
                .partner(kunde)
                .add_line("8400", Decimal::new(-2500, 2))
                .build(),
        ],
    );

    let exporter = DatevExporter::new(&ledger);

    let request = ExportRequest::buchungsstapel(Period::Month {
        year: 2024,
        month: 3,
    })
    .include_attachments(true);
    let archive = exporter.export(&request)?;
    std::fs::write(&archive.file_name, &archive.bytes)?;
    println!("{} ({} bytes)", archive.file_name, archive.bytes.len());
    for member in &archive.members {
        println!("  {member}");
    }

    let partners = exporter.export(&ExportRequest::debitoren_kreditoren())?;
    std::fs::write(&partners.file_name, &partners.bytes)?;
    println!("{} ({} bytes)", partners.file_name, partners.bytes.len());

    Ok(())
}
