use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::DatevError;
use super::types::MoveType;

/// DATEV export mode (Formatkategorie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportMode {
    /// Buchungsstapel (posting batch), category 21.
    Buchungsstapel,
    /// Debitoren/Kreditoren (partner master data), category 16.
    DebitorenKreditoren,
}

impl ExportMode {
    /// Format category code written to the EXTF header.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Buchungsstapel => "21",
            Self::DebitorenKreditoren => "16",
        }
    }

    /// Format name written to the EXTF header.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buchungsstapel => "Buchungsstapel",
            Self::DebitorenKreditoren => "Debitoren/Kreditoren",
        }
    }

    /// Format version (record type number) of the category.
    pub fn record_type(&self) -> &'static str {
        match self {
            Self::Buchungsstapel => "13",
            Self::DebitorenKreditoren => "5",
        }
    }

    /// Label as used in file names (no slash).
    pub fn file_label(&self) -> &'static str {
        match self {
            Self::Buchungsstapel => "Buchungsstapel",
            Self::DebitorenKreditoren => "Debitoren_Kreditoren",
        }
    }
}

/// Which move types to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceTypeFilter {
    /// Invoices and credit notes.
    #[default]
    All,
    /// Standard invoices only.
    InvoicesOnly,
    /// Credit notes only.
    CreditNotesOnly,
}

impl InvoiceTypeFilter {
    /// Move types accepted by this filter.
    pub fn move_types(&self) -> Vec<MoveType> {
        match self {
            Self::All => vec![MoveType::Invoice, MoveType::CreditNote],
            Self::InvoicesOnly => vec![MoveType::Invoice],
            Self::CreditNotesOnly => vec![MoveType::CreditNote],
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DatevError> {
        if start > end {
            return Err(DatevError::Validation(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First to last calendar day of the given month.
    pub fn month(year: i32, month: u32) -> Result<Self, DatevError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DatevError::Validation(format!("invalid month selector {year}-{month:02}"))
        })?;
        let end = last_day_of_month(year, month).ok_or_else(|| {
            DatevError::Validation(format!("invalid month selector {year}-{month:02}"))
        })?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the range covers exactly one full calendar month.
    pub fn is_full_month(&self) -> bool {
        self.start.day() == 1
            && self.start.year() == self.end.year()
            && self.start.month() == self.end.month()
            && last_day_of_month(self.start.year(), self.start.month()) == Some(self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bis {}", self.start, self.end)
    }
}

/// Last calendar day of a month, accounting for leap years.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Export period: either an explicit range or a month/year selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Range { start: NaiveDate, end: NaiveDate },
    Month { year: i32, month: u32 },
}

impl Period {
    pub fn resolve(&self) -> Result<DateRange, DatevError> {
        match *self {
            Self::Range { start, end } => DateRange::new(start, end),
            Self::Month { year, month } => DateRange::month(year, month),
        }
    }
}

/// How partner account numbers are rendered into Konto / Gegenkonto cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartnerAccountStrategy {
    /// Use the receivable account code as configured.
    #[default]
    ReceivableCode,
    /// Derive a personal account: `1`/`7` prefix plus the zero-padded partner id
    /// for receivable/payable accounts, the zero-filled code otherwise.
    Derived,
}

/// Configuration of a single export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Buchungsstapel or Debitoren/Kreditoren.
    pub mode: ExportMode,
    /// Period to export; mandatory for Buchungsstapel, ignored otherwise.
    pub period: Option<Period>,
    /// Move types to include.
    pub invoice_types: InvoiceTypeFilter,
    /// Embed primary attachments and `document.xml`.
    pub include_attachments: bool,
    /// Restrict the partner export to companies.
    pub company_only: bool,
    /// Partner account rendering.
    pub partner_accounts: PartnerAccountStrategy,
}

impl ExportRequest {
    /// Buchungsstapel request with the mode's defaults.
    pub fn buchungsstapel(period: Period) -> Self {
        Self {
            mode: ExportMode::Buchungsstapel,
            period: Some(period),
            invoice_types: InvoiceTypeFilter::All,
            include_attachments: false,
            company_only: false,
            partner_accounts: PartnerAccountStrategy::default(),
        }
    }

    /// Debitoren/Kreditoren request with the mode's defaults (companies only).
    pub fn debitoren_kreditoren() -> Self {
        Self {
            mode: ExportMode::DebitorenKreditoren,
            period: None,
            invoice_types: InvoiceTypeFilter::All,
            include_attachments: false,
            company_only: true,
            partner_accounts: PartnerAccountStrategy::default(),
        }
    }

    pub fn invoice_types(mut self, filter: InvoiceTypeFilter) -> Self {
        self.invoice_types = filter;
        self
    }

    pub fn include_attachments(mut self, include: bool) -> Self {
        self.include_attachments = include;
        self
    }

    pub fn company_only(mut self, company_only: bool) -> Self {
        self.company_only = company_only;
        self
    }

    pub fn partner_accounts(mut self, strategy: PartnerAccountStrategy) -> Self {
        self.partner_accounts = strategy;
        self
    }

    /// Validate the request and resolve its date range.
    ///
    /// Returns `Ok(None)` for partner exports, which are not date-bound.
    pub fn resolve_range(&self) -> Result<Option<DateRange>, DatevError> {
        match self.mode {
            ExportMode::Buchungsstapel => {
                let period = self.period.ok_or_else(|| {
                    DatevError::Validation(
                        "Buchungsstapel export requires a start and end date".into(),
                    )
                })?;
                period.resolve().map(Some)
            }
            ExportMode::DebitorenKreditoren => Ok(None),
        }
    }
}
