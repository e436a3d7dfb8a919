use tracing::{info, warn};

use crate::api::traits::FinanceApi;
use crate::errors::DashboardError;
use crate::models::forms::TransactionForm;
use crate::models::transaction::NewTransaction;

/// The "add transaction" mutation.
///
/// Returns `Ok` only when the form was valid AND the backend accepted the
/// transaction; callers gate the form reset and refresh on that.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    pub async fn submit(
        &self,
        api: &dyn FinanceApi,
        form: &TransactionForm,
    ) -> Result<NewTransaction, DashboardError> {
        let transaction = form.validate()?;
        if let Err(e) = api.create_transaction(&transaction).await {
            warn!("Creating transaction failed: {e}");
            return Err(e);
        }
        info!(
            "Created {} of {} in '{}' on {}",
            transaction.kind, transaction.amount, transaction.category, transaction.date
        );
        Ok(transaction)
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
