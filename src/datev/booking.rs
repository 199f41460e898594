//! Buchungsstapel records: one posting per revenue account per invoice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::columns::booking_field as field;
use super::format::{
    DOCUMENT_NUMBER_MAX, POSTING_TEXT_MAX, document_date, due_date, format_amount, truncate,
};
use super::partner::partner_account;
use super::row::{DatevRow, RecordKind};
use crate::core::{InvoiceRecord, PartnerAccountStrategy};

/// Revenue account used when an invoice has no line with an account.
pub const DEFAULT_REVENUE_ACCOUNT: &str = "4400";

/// Debit/Credit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitCredit {
    /// Soll (debit).
    Soll,
    /// Haben (credit).
    Haben,
}

impl DebitCredit {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Soll => "S",
            Self::Haben => "H",
        }
    }
}

/// Line totals of one invoice summed per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGroup {
    pub account: String,
    pub amount: Decimal,
}

/// A single Buchungsstapel posting (intermediate representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    /// Amount, always positive.
    pub amount: Decimal,
    /// `H` for invoices, `S` for credit notes.
    pub debit_credit: DebitCredit,
    /// Currency code of the invoice.
    pub currency_code: String,
    /// Revenue account (Konto).
    pub account: String,
    /// Partner account (Gegenkonto), empty if the partner has none.
    pub contra_account: String,
    /// Document date (Belegdatum).
    pub document_date: NaiveDate,
    /// Invoice number (Belegfeld 1).
    pub document_number: String,
    /// Due date, written to Belegfeld 2.
    pub due_date: Option<NaiveDate>,
    /// Posting text (Buchungstext).
    pub posting_text: String,
    /// Beleglink, e.g. `BEDI "<guid>"`.
    pub document_link: Option<String>,
}

impl BookingRecord {
    /// Lay the record out on a 125-column row.
    pub fn to_row(&self) -> DatevRow {
        let mut row = DatevRow::new(RecordKind::Booking);
        row.set(field::AMOUNT, format_amount(self.amount));
        row.set(field::DEBIT_CREDIT, self.debit_credit.code());
        row.set(field::CURRENCY, self.currency_code.as_str());
        row.set(field::ACCOUNT, self.account.as_str());
        row.set(field::CONTRA_ACCOUNT, self.contra_account.as_str());
        row.set(field::DOCUMENT_DATE, document_date(self.document_date));
        row.set(field::DOCUMENT_NUMBER, self.document_number.as_str());
        if let Some(d) = self.due_date {
            row.set(field::DUE_DATE, due_date(d));
        }
        row.set(field::POSTING_TEXT, self.posting_text.as_str());
        if let Some(link) = &self.document_link {
            row.set(field::DOCUMENT_LINK, link.as_str());
        }
        row
    }
}

/// Group an invoice's lines by account, in first-seen order.
///
/// Lines without an account are skipped. An invoice without any groupable
/// line is booked in full on [`DEFAULT_REVENUE_ACCOUNT`].
pub fn group_by_account(inv: &InvoiceRecord) -> Vec<AccountGroup> {
    let mut groups: Vec<AccountGroup> = Vec::new();

    for (idx, line) in inv.lines.iter().enumerate() {
        let Some(account) = line.account_code.as_deref().filter(|c| !c.is_empty()) else {
            warn!(
                invoice = %inv.number,
                line = idx + 1,
                "skipping invoice line without account"
            );
            continue;
        };
        match groups.iter_mut().find(|g| g.account == account) {
            Some(group) => group.amount += line.total,
            None => groups.push(AccountGroup {
                account: account.to_string(),
                amount: line.total,
            }),
        }
    }

    if groups.is_empty() {
        warn!(
            invoice = %inv.number,
            account = DEFAULT_REVENUE_ACCOUNT,
            "no line with an account, booking invoice total on default account"
        );
        groups.push(AccountGroup {
            account: DEFAULT_REVENUE_ACCOUNT.to_string(),
            amount: inv.amount_total,
        });
    }

    groups
}

/// Convert a single invoice into one posting per account group.
pub fn invoice_to_records(
    inv: &InvoiceRecord,
    strategy: PartnerAccountStrategy,
    account_length: Option<u8>,
) -> Vec<BookingRecord> {
    let debit_credit = if inv.is_credit_note() {
        DebitCredit::Soll
    } else {
        DebitCredit::Haben
    };

    let contra_account = inv
        .partner
        .as_ref()
        .map(|p| partner_account(p, strategy, account_length))
        .unwrap_or_default();

    let posting_text = inv
        .partner
        .as_ref()
        .map(|p| truncate(&p.commercial_partner().name, POSTING_TEXT_MAX))
        .unwrap_or_default();

    let document_link = inv
        .attachment
        .as_ref()
        .map(|_| format!("BEDI \"{}\"", inv.document_guid()));

    let document_number = truncate(&inv.number, DOCUMENT_NUMBER_MAX);

    group_by_account(inv)
        .into_iter()
        .map(|group| BookingRecord {
            amount: group.amount.abs(),
            debit_credit,
            currency_code: inv.currency_code.clone(),
            account: group.account,
            contra_account: contra_account.clone(),
            document_date: inv.invoice_date,
            document_number: document_number.clone(),
            due_date: inv.due_date,
            posting_text: posting_text.clone(),
            document_link: document_link.clone(),
        })
        .collect()
}

/// Booking rows for a set of invoices, in invoice order.
pub fn booking_rows(
    invoices: &[InvoiceRecord],
    strategy: PartnerAccountStrategy,
    account_length: Option<u8>,
) -> Vec<DatevRow> {
    invoices
        .iter()
        .flat_map(|inv| invoice_to_records(inv, strategy, account_length))
        .map(|rec| rec.to_row())
        .collect()
}
