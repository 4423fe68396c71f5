//! Customer creation across three transactional steps
//!
//! `create_customer` runs, in order:
//!
//! 1. log the attempt (REQUIRES_NEW, committed immediately)
//! 2. insert the customer (in the REQUIRED boundary)
//! 3. create the invoice (MANDATORY, joins the same boundary)
//! 4. check the name format
//!
//! The name check runs last on purpose: a bad name rolls back the staged
//! customer and invoice, while the log entry from step 1 stays committed.

use lazy_static::lazy_static;
use regex::Regex;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, QueryOrder, Set};
use tracing::{info, warn};

use crate::entities::{customer, prelude::Customer};
use crate::error::CustomerError;
use crate::services::invoice_manager::InvoiceManager;
use crate::services::log_message_manager::LogMessageManager;
use crate::tx::{Propagation, TransactionManager};

lazy_static! {
    // Letters from any script, plus '-'
    static ref NAME_REGEX: Regex = Regex::new(r"^[\p{L}-]+$").unwrap();
}

pub fn name_is_valid(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

#[derive(Clone)]
pub struct CustomerManager {
    tx: TransactionManager,
    log_messages: LogMessageManager,
    invoices: InvoiceManager,
}

impl CustomerManager {
    pub fn new(tx: TransactionManager) -> Self {
        Self {
            log_messages: LogMessageManager::new(tx.clone()),
            invoices: InvoiceManager::new(tx.clone()),
            tx,
        }
    }

    pub fn log_messages(&self) -> &LogMessageManager {
        &self.log_messages
    }

    pub fn invoices(&self) -> &InvoiceManager {
        &self.invoices
    }

    /// Create a customer named `name` (REQUIRED)
    ///
    /// Joins `current` at a savepoint when given. A failure rolls back to the
    /// savepoint, so the caller's transaction never keeps a half-created
    /// customer, and a success leaves the final commit to the caller.
    /// Otherwise the customer and invoice are committed here before returning.
    pub async fn create_customer(
        &self,
        name: &str,
        current: Option<&DatabaseTransaction>,
    ) -> Result<customer::Model, CustomerError> {
        let boundary = self
            .tx
            .begin(Propagation::Required, current, "create_customer")
            .await?;

        let outcome = self.create_within(name, &boundary).await;
        match outcome {
            Ok(customer) => {
                let owner = boundary.is_owner();
                boundary
                    .commit()
                    .await
                    .map_err(|e| CustomerError::from_write(e, name))?;
                if owner {
                    info!(id = customer.id, "Created customer '{}'", name);
                }
                Ok(customer)
            }
            Err(err) => {
                warn!(
                    owner = boundary.is_owner(),
                    "Creation of customer '{}' failed: {}",
                    name,
                    err
                );
                if let Err(rollback_err) = boundary.rollback().await {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    async fn create_within(
        &self,
        name: &str,
        txn: &DatabaseTransaction,
    ) -> Result<customer::Model, CustomerError> {
        self.log_messages
            .log_create_customer(name, Some(txn))
            .await?;

        let customer = customer::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| CustomerError::from_write(e, name))?;

        self.invoices.create_invoice(&customer, Some(txn)).await?;

        // Checked after the writes are staged so the rollback is observable
        if !name_is_valid(name) {
            return Err(CustomerError::InvalidName(name.to_string()));
        }

        Ok(customer)
    }

    /// All customers in insertion order (NEVER)
    pub async fn list_customers(
        &self,
        current: Option<&DatabaseTransaction>,
    ) -> Result<Vec<customer::Model>, CustomerError> {
        let db = self.tx.never(current, "list_customers")?;

        Ok(Customer::find()
            .order_by_asc(customer::Column::Id)
            .all(db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_hyphens_are_valid() {
        assert!(name_is_valid("Alice"));
        assert!(name_is_valid("Jean-Luc"));
        assert!(name_is_valid("Zoë"));
        assert!(name_is_valid("Łukasz"));
        assert!(name_is_valid("山田"));
        assert!(name_is_valid("-"));
    }

    #[test]
    fn test_digits_spaces_and_symbols_are_invalid() {
        assert!(!name_is_valid(""));
        assert!(!name_is_valid("R2-D2"));
        assert!(!name_is_valid("Mary Ann"));
        assert!(!name_is_valid("O'Brien"));
        assert!(!name_is_valid("bob_smith"));
        assert!(!name_is_valid("Alice\n"));
    }
}
