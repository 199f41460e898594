use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for ledger invoice records.
///
/// Mostly used by ledger adapters and tests. When no explicit total is set,
/// the invoice total is the sum of its line totals.
///
/// ```
/// use datev_export::core::*;
/// use rust_decimal::Decimal;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceRecordBuilder::new(1, "RE/2024/0001", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
///     .due_date(NaiveDate::from_ymd_opt(2024, 4, 14).unwrap())
///     .partner(PartnerBuilder::new(7, "Kunde AG").company().receivable("10000").build())
///     .add_line("8400", Decimal::new(10000, 2))
///     .add_line("8300", Decimal::new(5000, 2))
///     .build();
///
/// assert_eq!(invoice.amount_total, Decimal::new(15000, 2));
/// ```
pub struct InvoiceRecordBuilder {
    id: u64,
    number: String,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    amount_total: Option<Decimal>,
    currency_code: String,
    move_type: MoveType,
    state: PostingState,
    category: DocumentCategory,
    partner: Option<PartnerRecord>,
    lines: Vec<InvoiceLine>,
    attachment: Option<Attachment>,
}

impl InvoiceRecordBuilder {
    pub fn new(id: u64, number: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Self {
            id,
            number: number.into(),
            invoice_date,
            due_date: None,
            amount_total: None,
            currency_code: "EUR".to_string(),
            move_type: MoveType::Invoice,
            state: PostingState::Posted,
            category: DocumentCategory::Sale,
            partner: None,
            lines: Vec::new(),
            attachment: None,
        }
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Override the invoice total instead of summing the lines.
    pub fn amount_total(mut self, amount: Decimal) -> Self {
        self.amount_total = Some(amount);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn move_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    /// Shorthand for `move_type(MoveType::CreditNote)`.
    pub fn credit_note(self) -> Self {
        self.move_type(MoveType::CreditNote)
    }

    pub fn state(mut self, state: PostingState) -> Self {
        self.state = state;
        self
    }

    pub fn category(mut self, category: DocumentCategory) -> Self {
        self.category = category;
        self
    }

    pub fn partner(mut self, partner: PartnerRecord) -> Self {
        self.partner = Some(partner);
        self
    }

    /// Add a line booked on the given revenue account.
    pub fn add_line(mut self, account_code: impl Into<String>, total: Decimal) -> Self {
        self.lines.push(InvoiceLine::new(account_code, total));
        self
    }

    /// Add a line without an account.
    pub fn add_unassigned_line(mut self, total: Decimal) -> Self {
        self.lines.push(InvoiceLine::unassigned(total));
        self
    }

    pub fn attachment(mut self, file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.attachment = Some(Attachment {
            file_name: file_name.into(),
            data: data.into(),
        });
        self
    }

    pub fn build(self) -> InvoiceRecord {
        let amount_total = self
            .amount_total
            .unwrap_or_else(|| self.lines.iter().map(|l| l.total).sum());
        InvoiceRecord {
            id: self.id,
            number: self.number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            amount_total,
            currency_code: self.currency_code,
            move_type: self.move_type,
            state: self.state,
            category: self.category,
            partner: self.partner,
            lines: self.lines,
            attachment: self.attachment,
        }
    }
}

/// Builder for partner records.
pub struct PartnerBuilder {
    id: u64,
    name: String,
    is_company: bool,
    vat_id: Option<String>,
    receivable_account: Option<AccountRef>,
    parent: Option<PartnerRecord>,
}

impl PartnerBuilder {
    /// New natural-person partner without accounts.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_company: false,
            vat_id: None,
            receivable_account: None,
            parent: None,
        }
    }

    /// Mark the partner as a company.
    pub fn company(mut self) -> Self {
        self.is_company = true;
        self
    }

    pub fn vat_id(mut self, id: impl Into<String>) -> Self {
        self.vat_id = Some(id.into());
        self
    }

    /// Set a receivable (Debitor) account.
    pub fn receivable(mut self, code: impl Into<String>) -> Self {
        self.receivable_account = Some(AccountRef::receivable(code));
        self
    }

    /// Set a payable (Kreditor) account in the receivable slot.
    pub fn payable(mut self, code: impl Into<String>) -> Self {
        self.receivable_account = Some(AccountRef::payable(code));
        self
    }

    pub fn account(mut self, account: AccountRef) -> Self {
        self.receivable_account = Some(account);
        self
    }

    pub fn parent(mut self, parent: PartnerRecord) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn build(self) -> PartnerRecord {
        PartnerRecord {
            id: self.id,
            name: self.name,
            is_company: self.is_company,
            vat_id: self.vat_id,
            receivable_account: self.receivable_account,
            parent: self.parent.map(Box::new),
        }
    }
}
