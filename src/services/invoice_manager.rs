use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, QueryOrder, Set};

use crate::entities::customer;
use crate::entities::{invoice, prelude::Invoice};
use crate::error::CustomerError;
use crate::tx::{Propagation, TransactionManager};

pub fn invoice_description(name: &str) -> String {
    format!("Created invoice for customer named: {}", name)
}

#[derive(Clone)]
pub struct InvoiceManager {
    tx: TransactionManager,
}

impl InvoiceManager {
    pub fn new(tx: TransactionManager) -> Self {
        Self { tx }
    }

    /// Invoice `customer` inside the caller's transaction (MANDATORY)
    ///
    /// Runs at a savepoint of the caller's transaction. Nothing is committed
    /// here: the invoice lives or dies with the transaction that created the
    /// customer.
    pub async fn create_invoice(
        &self,
        customer: &customer::Model,
        current: Option<&DatabaseTransaction>,
    ) -> Result<invoice::Model, CustomerError> {
        let boundary = self
            .tx
            .begin(Propagation::Mandatory, current, "create_invoice")
            .await?;

        let inserted = invoice::ActiveModel {
            customer_id: Set(customer.id),
            description: Set(invoice_description(&customer.name)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&*boundary)
        .await;

        let invoice = match inserted {
            Ok(model) => model,
            Err(e) => {
                if let Err(rollback_err) = boundary.rollback().await {
                    tracing::warn!("Rollback of invoice savepoint failed: {}", rollback_err);
                }
                return Err(e.into());
            }
        };

        boundary.commit().await?;

        tracing::debug!(
            invoice_id = invoice.id,
            customer_id = customer.id,
            "Staged invoice"
        );
        Ok(invoice)
    }

    /// All invoices in insertion order (NEVER)
    pub async fn list_invoices(
        &self,
        current: Option<&DatabaseTransaction>,
    ) -> Result<Vec<invoice::Model>, CustomerError> {
        let db = self.tx.never(current, "list_invoices")?;

        Ok(Invoice::find()
            .order_by_asc(invoice::Column::Id)
            .all(db)
            .await?)
    }
}
