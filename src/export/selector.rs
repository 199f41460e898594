//! Record selection: request → ledger query → ordered invoices.

use tracing::debug;

use crate::core::{
    DateRange, DatevError, ExportMode, ExportRequest, InvoiceQuery, InvoiceRecord, Ledger,
    PostingState,
};

/// Build the ledger query for a request with an already resolved range.
pub fn build_query(request: &ExportRequest, range: Option<DateRange>) -> InvoiceQuery {
    InvoiceQuery {
        date_range: match request.mode {
            ExportMode::Buchungsstapel => range,
            ExportMode::DebitorenKreditoren => None,
        },
        state: PostingState::Posted,
        move_types: request.invoice_types.move_types(),
    }
}

/// Fetch the invoices to export, in ledger order.
///
/// Records the ledger returns outside the query are dropped. An empty
/// selection is reported as [`DatevError::NoRecordsFound`].
pub fn select_invoices<L: Ledger + ?Sized>(
    ledger: &L,
    request: &ExportRequest,
    range: Option<DateRange>,
) -> Result<Vec<InvoiceRecord>, DatevError> {
    let query = build_query(request, range);
    let mut invoices = ledger.find_invoices(&query)?;

    let returned = invoices.len();
    invoices.retain(|inv| query.matches(inv));
    if invoices.len() != returned {
        debug!(
            returned,
            kept = invoices.len(),
            "dropped ledger records outside the query"
        );
    }

    if invoices.is_empty() {
        return Err(DatevError::NoRecordsFound {
            criteria: query.describe(),
        });
    }

    debug!(count = invoices.len(), mode = request.mode.label(), "selected invoices");
    Ok(invoices)
}
