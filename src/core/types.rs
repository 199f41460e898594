use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice record as exposed by the ledger (read-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Ledger identifier, stable across exports.
    pub id: u64,
    /// Invoice number (Belegfeld 1).
    pub number: String,
    /// Invoice date (Belegdatum).
    pub invoice_date: NaiveDate,
    /// Payment due date (Fälligkeit).
    pub due_date: Option<NaiveDate>,
    /// Invoice total, already computed by the ledger.
    pub amount_total: Decimal,
    /// Invoice currency code (ISO 4217, e.g. "EUR").
    pub currency_code: String,
    /// Invoice or credit note.
    pub move_type: MoveType,
    /// Posting state.
    pub state: PostingState,
    /// Sales / purchase classifier used for the document manifest.
    pub category: DocumentCategory,
    /// Invoiced partner.
    pub partner: Option<PartnerRecord>,
    /// Invoice lines in ledger order.
    pub lines: Vec<InvoiceLine>,
    /// Primary attachment (usually the rendered PDF).
    pub attachment: Option<Attachment>,
}

impl InvoiceRecord {
    /// Deterministic document GUID used for the `BEDI` link and `document.xml`.
    pub fn document_guid(&self) -> Uuid {
        Uuid::new_v5(
            &Uuid::NAMESPACE_URL,
            format!("account.move/{}", self.id).as_bytes(),
        )
    }

    pub fn is_credit_note(&self) -> bool {
        self.move_type == MoveType::CreditNote
    }
}

/// A single invoice line, reduced to what the booking export needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Revenue account code (Konto); `None` for lines without an account.
    pub account_code: Option<String>,
    /// Line total as computed by the ledger.
    pub total: Decimal,
}

impl InvoiceLine {
    pub fn new(account_code: impl Into<String>, total: Decimal) -> Self {
        Self {
            account_code: Some(account_code.into()),
            total,
        }
    }

    /// A line that carries no account (section, note or rounding line).
    pub fn unassigned(total: Decimal) -> Self {
        Self {
            account_code: None,
            total,
        }
    }
}

/// Binary attachment stored alongside an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Stored file name, used verbatim inside the archive.
    pub file_name: String,
    /// Raw file content.
    pub data: Vec<u8>,
}

/// Business partner (Debitor / Kreditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerRecord {
    /// Ledger identifier, used for deduplication and derived account numbers.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// `true` for companies, `false` for natural persons.
    pub is_company: bool,
    /// VAT identifier (EU-UStID).
    pub vat_id: Option<String>,
    /// Receivable account configured on the partner.
    pub receivable_account: Option<AccountRef>,
    /// Parent company, if this partner is a contact of a company.
    pub parent: Option<Box<PartnerRecord>>,
}

impl PartnerRecord {
    /// Walk up the parent chain to the top-level commercial entity.
    pub fn commercial_partner(&self) -> &PartnerRecord {
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            current = parent;
        }
        current
    }

    /// Receivable account code, if set and non-empty.
    pub fn receivable_code(&self) -> Option<&str> {
        self.receivable_account
            .as_ref()
            .map(|a| a.code.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// Reference to a ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Account code as configured in the chart of accounts.
    pub code: String,
    /// Account type.
    pub kind: AccountKind,
}

impl AccountRef {
    pub fn receivable(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind: AccountKind::Receivable,
        }
    }

    pub fn payable(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind: AccountKind::Payable,
        }
    }
}

/// Account type, as far as DATEV account derivation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Accounts receivable (Debitor).
    Receivable,
    /// Accounts payable (Kreditor).
    Payable,
    /// Any other account.
    Other,
}

/// Move type of an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    /// Standard invoice.
    Invoice,
    /// Credit note (Gutschrift / Rechnungskorrektur).
    CreditNote,
}

impl MoveType {
    /// German label used in log lines and error criteria.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Rechnungen",
            Self::CreditNote => "Gutschriften",
        }
    }
}

/// Posting state of a ledger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostingState {
    Draft,
    Posted,
    Cancelled,
}

/// Sales / purchase classification of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    /// Outgoing (sales) document.
    Sale,
    /// Incoming (purchase) document.
    Purchase,
    /// Neither, e.g. a miscellaneous journal entry.
    Other,
}

impl DocumentCategory {
    /// `<DocumentType>` code in `document.xml`, if any.
    pub fn document_type(&self) -> Option<u8> {
        match self {
            Self::Sale => Some(2),
            Self::Purchase => Some(1),
            Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner(id: u64, name: &str) -> PartnerRecord {
        PartnerRecord {
            id,
            name: name.into(),
            is_company: false,
            vat_id: None,
            receivable_account: None,
            parent: None,
        }
    }

    #[test]
    fn commercial_partner_walks_to_top() {
        let mut holding = partner(1, "Holding AG");
        holding.is_company = true;
        let mut subsidiary = partner(2, "Tochter GmbH");
        subsidiary.parent = Some(Box::new(holding));
        let mut contact = partner(3, "Erika Musterfrau");
        contact.parent = Some(Box::new(subsidiary));

        assert_eq!(contact.commercial_partner().name, "Holding AG");
    }

    #[test]
    fn commercial_partner_without_parent_is_self() {
        let p = partner(1, "Max Mustermann");
        assert_eq!(p.commercial_partner().id, 1);
    }

    #[test]
    fn receivable_code_ignores_empty() {
        let mut p = partner(1, "X");
        p.receivable_account = Some(AccountRef::receivable(""));
        assert_eq!(p.receivable_code(), None);
        p.receivable_account = Some(AccountRef::receivable("10000"));
        assert_eq!(p.receivable_code(), Some("10000"));
    }

    #[test]
    fn document_type_codes() {
        assert_eq!(DocumentCategory::Sale.document_type(), Some(2));
        assert_eq!(DocumentCategory::Purchase.document_type(), Some(1));
        assert_eq!(DocumentCategory::Other.document_type(), None);
    }
}
