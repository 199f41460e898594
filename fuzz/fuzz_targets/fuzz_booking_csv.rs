#![no_main]

use chrono::NaiveDate;
use datev_export::core::*;
use datev_export::datev::{self, BUCHUNGSSTAPEL_WIDTH, ExtfContext};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = s.splitn(3, '\u{1f}');
    let number = parts.next().unwrap_or_default();
    let name = parts.next().unwrap_or_default();
    let account = parts.next().unwrap_or_default();

    let Some(day) = NaiveDate::from_ymd_opt(2024, 3, 15) else {
        return;
    };
    let partner = PartnerBuilder::new(1, name).company().receivable(account).build();
    let invoice = InvoiceRecordBuilder::new(1, number, day)
        .partner(partner)
        .add_line(account, Decimal::new(data.len() as i64, 2))
        .build();

    let settings = CompanySettings::default();
    let ctx = ExtfContext {
        settings: &settings,
        range: DateRange::month(2024, 3).ok(),
        created_at: day.and_time(Default::default()),
        partner_accounts: PartnerAccountStrategy::ReceivableCode,
    };

    // Whatever the input, every data row must parse back to full width.
    if let Ok(out) = datev::to_buchungsstapel(&[invoice], &ctx) {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .quote(b'\'')
            .has_headers(false)
            .flexible(true)
            .from_reader(out.as_bytes());
        for record in reader.records().skip(2).flatten() {
            assert_eq!(record.len(), BUCHUNGSSTAPEL_WIDTH);
        }
    }
});
