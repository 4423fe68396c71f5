//! Log of every attempt to create a customer
//!
//! Entries are written in their own transaction so they survive whatever
//! happens to the customer write that follows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, QueryOrder, Set};

use crate::entities::{log_message, prelude::LogMessage};
use crate::error::CustomerError;
use crate::tx::{Propagation, TransactionManager};

pub fn attempt_message(name: &str) -> String {
    format!("Attempt to create record for customer: '{}'", name)
}

#[derive(Clone)]
pub struct LogMessageManager {
    tx: TransactionManager,
}

impl LogMessageManager {
    pub fn new(tx: TransactionManager) -> Self {
        Self { tx }
    }

    /// Record an attempt to create `name` (REQUIRES_NEW)
    ///
    /// The entry is committed before returning, independently of `current`.
    /// A unique-constraint violation surfaces as `AlreadyExists`.
    pub async fn log_create_customer(
        &self,
        name: &str,
        current: Option<&DatabaseTransaction>,
    ) -> Result<log_message::Model, CustomerError> {
        let boundary = self
            .tx
            .begin(Propagation::RequiresNew, current, "log_create_customer")
            .await?;

        let entry = log_message::ActiveModel {
            message: Set(attempt_message(name)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let inserted = entry.insert(&*boundary).await;
        let entry = match inserted {
            Ok(model) => model,
            Err(e) => {
                if let Err(rollback_err) = boundary.rollback().await {
                    tracing::warn!("Rollback of log entry failed: {}", rollback_err);
                }
                return Err(CustomerError::from_write(e, name));
            }
        };

        boundary
            .commit()
            .await
            .map_err(|e| CustomerError::from_write(e, name))?;

        tracing::debug!(id = entry.id, "Logged attempt for customer '{}'", name);
        Ok(entry)
    }

    /// All log entries in insertion order (NEVER)
    pub async fn list_log_messages(
        &self,
        current: Option<&DatabaseTransaction>,
    ) -> Result<Vec<log_message::Model>, CustomerError> {
        let db = self.tx.never(current, "list_log_messages")?;

        Ok(LogMessage::find()
            .order_by_asc(log_message::Column::Id)
            .all(db)
            .await?)
    }
}
