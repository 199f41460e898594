use serde::{Deserialize, Serialize};

use super::error::DatevError;
use super::request::DateRange;
use super::settings::CompanySettings;
use super::types::{InvoiceRecord, MoveType, PostingState};

/// Selection criteria handed to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceQuery {
    /// Inclusive invoice-date range; `None` means unbounded.
    pub date_range: Option<DateRange>,
    /// Required posting state.
    pub state: PostingState,
    /// Accepted move types.
    pub move_types: Vec<MoveType>,
}

impl InvoiceQuery {
    /// Whether `invoice` passes every criterion of this query.
    pub fn matches(&self, invoice: &InvoiceRecord) -> bool {
        invoice.state == self.state
            && self.move_types.contains(&invoice.move_type)
            && self
                .date_range
                .is_none_or(|r| r.contains(invoice.invoice_date))
    }

    /// Human-readable criteria, used in empty-result errors.
    pub fn describe(&self) -> String {
        let types = self
            .move_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ");
        match &self.date_range {
            Some(range) => format!("{range} ({types}, gebucht)"),
            None => format!("alle Zeiträume ({types}, gebucht)"),
        }
    }
}

/// Source of invoice records and company settings.
///
/// The encoder only talks to the accounting system through this trait.
pub trait Ledger {
    /// Invoices matching the query, in export order.
    fn find_invoices(&self, query: &InvoiceQuery) -> Result<Vec<InvoiceRecord>, DatevError>;

    /// Company-level DATEV configuration.
    fn company_settings(&self) -> CompanySettings;
}

/// Ledger backed by an in-memory list, ordered by invoice date then number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    invoices: Vec<InvoiceRecord>,
    settings: CompanySettings,
}

impl InMemoryLedger {
    pub fn new(settings: CompanySettings) -> Self {
        Self {
            invoices: Vec::new(),
            settings,
        }
    }

    pub fn with_invoices(settings: CompanySettings, invoices: Vec<InvoiceRecord>) -> Self {
        Self { invoices, settings }
    }

    pub fn push(&mut self, invoice: InvoiceRecord) {
        self.invoices.push(invoice);
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

impl Ledger for InMemoryLedger {
    fn find_invoices(&self, query: &InvoiceQuery) -> Result<Vec<InvoiceRecord>, DatevError> {
        let mut found: Vec<InvoiceRecord> = self
            .invoices
            .iter()
            .filter(|inv| query.matches(inv))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.invoice_date
                .cmp(&b.invoice_date)
                .then_with(|| a.number.cmp(&b.number))
        });
        Ok(found)
    }

    fn company_settings(&self) -> CompanySettings {
        self.settings.clone()
    }
}
