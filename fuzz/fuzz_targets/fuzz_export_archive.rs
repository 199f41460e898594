#![no_main]

use chrono::NaiveDate;
use datev_export::core::*;
use datev_export::export::DatevExporter;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Some(day) = NaiveDate::from_ymd_opt(2024, 3, 1) else {
        return;
    };

    // Each line becomes one invoice with an attachment named after it.
    let invoices: Vec<InvoiceRecord> = s
        .lines()
        .take(32)
        .enumerate()
        .map(|(i, line)| {
            InvoiceRecordBuilder::new(i as u64, line, day)
                .add_line("8400", Decimal::new(line.len() as i64, 2))
                .attachment(line, line.as_bytes().to_vec())
                .build()
        })
        .collect();

    let ledger = InMemoryLedger::with_invoices(CompanySettings::default(), invoices);
    let request = ExportRequest::buchungsstapel(Period::Month { year: 2024, month: 3 })
        .include_attachments(true);
    let _ = DatevExporter::new(&ledger)
        .generated_at(day.and_time(Default::default()))
        .export(&request);
});
