//! Debitoren/Kreditoren master records.

use super::columns::partner_field as field;
use super::row::{DatevRow, RecordKind};
use crate::core::{AccountKind, InvoiceRecord, PartnerAccountStrategy, PartnerRecord};

/// Account length assumed when the company has none configured.
const DEFAULT_ACCOUNT_LENGTH: usize = 4;

/// Address type (Adressattyp) of a partner record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    /// Natürliche Person.
    Individual,
    /// Unternehmen.
    Company,
}

impl AddressType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Individual => "1",
            Self::Company => "2",
        }
    }
}

/// A single Debitoren/Kreditoren record.
///
/// Company name and individual name are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerMasterRecord {
    pub account: String,
    pub company_name: Option<String>,
    pub person_name: Option<String>,
    pub address_type: AddressType,
    pub vat_id: Option<String>,
}

impl PartnerMasterRecord {
    pub fn from_partner(
        partner: &PartnerRecord,
        strategy: PartnerAccountStrategy,
        account_length: Option<u8>,
    ) -> Self {
        let (company_name, person_name, address_type) = if partner.is_company {
            (Some(partner.name.clone()), None, AddressType::Company)
        } else {
            (None, Some(partner.name.clone()), AddressType::Individual)
        };
        Self {
            account: partner_account(partner, strategy, account_length),
            company_name,
            person_name,
            address_type,
            vat_id: partner.vat_id.clone(),
        }
    }

    /// Lay the record out on a 243-column row.
    pub fn to_row(&self) -> DatevRow {
        let mut row = DatevRow::new(RecordKind::Partner);
        row.set(field::ACCOUNT, self.account.as_str());
        if let Some(name) = &self.company_name {
            row.set(field::COMPANY_NAME, name.as_str());
        }
        if let Some(name) = &self.person_name {
            row.set(field::PERSON_NAME, name.as_str());
        }
        row.set(field::ADDRESS_TYPE, self.address_type.code());
        if let Some(vat_id) = &self.vat_id {
            row.set(field::VAT_ID, vat_id.as_str());
        }
        row
    }
}

/// Render the partner's account number for Konto / Gegenkonto cells.
///
/// Returns an empty string when the partner has no receivable account.
pub fn partner_account(
    partner: &PartnerRecord,
    strategy: PartnerAccountStrategy,
    account_length: Option<u8>,
) -> String {
    let Some(account) = &partner.receivable_account else {
        return String::new();
    };
    match strategy {
        PartnerAccountStrategy::ReceivableCode => account.code.clone(),
        PartnerAccountStrategy::Derived => {
            let width = account_length
                .map(usize::from)
                .filter(|l| *l > 0)
                .unwrap_or(DEFAULT_ACCOUNT_LENGTH);
            match account.kind {
                AccountKind::Receivable => format!("1{:0>width$}", partner.id),
                AccountKind::Payable => format!("7{:0>width$}", partner.id),
                AccountKind::Other => format!("{:0<width$}", account.code),
            }
        }
    }
}

/// Distinct partners of the given invoices, in first-seen order.
pub fn unique_partners(invoices: &[InvoiceRecord]) -> Vec<&PartnerRecord> {
    let mut partners: Vec<&PartnerRecord> = Vec::new();
    for partner in invoices.iter().filter_map(|inv| inv.partner.as_ref()) {
        if !partners.iter().any(|p| p.id == partner.id) {
            partners.push(partner);
        }
    }
    partners
}

/// Partners for a Debitoren/Kreditoren export, optionally companies only.
pub fn select_partners(invoices: &[InvoiceRecord], company_only: bool) -> Vec<&PartnerRecord> {
    unique_partners(invoices)
        .into_iter()
        .filter(|p| !company_only || p.is_company)
        .collect()
}

/// Partners for the file accompanying a Buchungsstapel: companies with a
/// receivable account code.
pub fn companion_partners(invoices: &[InvoiceRecord]) -> Vec<&PartnerRecord> {
    unique_partners(invoices)
        .into_iter()
        .filter(|p| p.is_company && p.receivable_code().is_some())
        .collect()
}

pub fn partner_rows(
    partners: &[&PartnerRecord],
    strategy: PartnerAccountStrategy,
    account_length: Option<u8>,
) -> Vec<DatevRow> {
    partners
        .iter()
        .map(|p| PartnerMasterRecord::from_partner(p, strategy, account_length).to_row())
        .collect()
}
