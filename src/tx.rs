//! Transaction boundaries with declarative propagation
//!
//! Each service operation states how it relates to the caller's transaction
//! (if any) and gets back a [`Boundary`] to run its queries on:
//!
//! | Propagation    | caller has a transaction | caller has none        |
//! |----------------|--------------------------|------------------------|
//! | `Required`     | join it (savepoint)      | begin a new one        |
//! | `RequiresNew`  | begin an independent one | begin a new one        |
//! | `Mandatory`    | join it (savepoint)      | fail                   |
//! | NEVER          | fail                     | run on the bare pool   |
//!
//! NEVER has no boundary to hand out, so it lives on
//! [`TransactionManager::never`] rather than in [`Propagation`].

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Join the caller's transaction, or begin one if there is none
    Required,
    /// Always begin an independent transaction on its own connection
    RequiresNew,
    /// Join the caller's transaction; there must be one
    Mandatory,
}

impl fmt::Display for Propagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Propagation::Required => write!(f, "REQUIRED"),
            Propagation::RequiresNew => write!(f, "REQUIRES_NEW"),
            Propagation::Mandatory => write!(f, "MANDATORY"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("{0} requires an active transaction")]
    NoActiveTransaction(&'static str),
    #[error("{0} must not be called inside an active transaction")]
    ActiveTransaction(&'static str),
    #[error("transaction limiter closed")]
    LimiterClosed(#[from] AcquireError),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// The transaction an operation runs in
pub enum Boundary {
    /// Begun by this boundary, which must commit or roll it back. Top-level
    /// REQUIRED boundaries hold an owner permit until they finish.
    Owned {
        txn: DatabaseTransaction,
        _permit: Option<OwnedSemaphorePermit>,
    },
    /// A savepoint inside the caller's transaction. Rolling it back undoes
    /// only this boundary's writes; committing releases it into the caller's
    /// transaction, whose owner decides the outcome.
    Joined(DatabaseTransaction),
}

impl Boundary {
    pub fn is_owner(&self) -> bool {
        matches!(self, Boundary::Owned { .. })
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        match self {
            Boundary::Owned { txn, _permit } => {
                txn.commit().await?;
                debug!("Committed owned transaction");
            }
            Boundary::Joined(savepoint) => {
                savepoint.commit().await?;
                debug!("Released savepoint into caller's transaction");
            }
        }
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), DbErr> {
        match self {
            Boundary::Owned { txn, _permit } => {
                txn.rollback().await?;
                debug!("Rolled back owned transaction");
            }
            Boundary::Joined(savepoint) => {
                savepoint.rollback().await?;
                debug!("Rolled back to savepoint");
            }
        }
        Ok(())
    }
}

impl Deref for Boundary {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &DatabaseTransaction {
        match self {
            Boundary::Owned { txn, .. } => txn,
            Boundary::Joined(savepoint) => savepoint,
        }
    }
}

/// Hands out transaction boundaries over the shared connection pool
///
/// A top-level REQUIRED transaction may need a second connection for a
/// REQUIRES_NEW step before it can finish. At most `max_connections - 1` of
/// them run at once, so one connection is always left for that step.
#[derive(Clone)]
pub struct TransactionManager {
    db: DatabaseConnection,
    owners: Arc<Semaphore>,
}

impl TransactionManager {
    pub fn new(db: DatabaseConnection, max_connections: u32) -> Self {
        let permits = max_connections.saturating_sub(1).max(1) as usize;
        Self {
            db,
            owners: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Open the boundary `operation` runs in, given the caller's transaction
    pub async fn begin(
        &self,
        propagation: Propagation,
        current: Option<&DatabaseTransaction>,
        operation: &'static str,
    ) -> Result<Boundary, TxError> {
        match (propagation, current) {
            (Propagation::Required | Propagation::Mandatory, Some(txn)) => {
                let savepoint = txn.begin().await?;
                debug!(%propagation, operation, "Joined caller's transaction at a savepoint");
                Ok(Boundary::Joined(savepoint))
            }
            (Propagation::Required, None) => {
                let permit = Arc::clone(&self.owners).acquire_owned().await?;
                let txn = self.db.begin().await?;
                debug!(%propagation, operation, "Began new transaction");
                Ok(Boundary::Owned {
                    txn,
                    _permit: Some(permit),
                })
            }
            (Propagation::RequiresNew, _) => {
                if current.is_some() {
                    debug!(%propagation, operation, "Suspending caller's transaction");
                }
                let txn = self.db.begin().await?;
                debug!(%propagation, operation, "Began new transaction");
                Ok(Boundary::Owned { txn, _permit: None })
            }
            (Propagation::Mandatory, None) => Err(TxError::NoActiveTransaction(operation)),
        }
    }

    /// NEVER: refuse to run inside a transaction, otherwise hand back the pool
    pub fn never(
        &self,
        current: Option<&DatabaseTransaction>,
        operation: &'static str,
    ) -> Result<&DatabaseConnection, TxError> {
        match current {
            Some(_) => Err(TxError::ActiveTransaction(operation)),
            None => Ok(&self.db),
        }
    }

    /// Top-level REQUIRED transactions that could start right now
    pub fn available_owners(&self) -> usize {
        self.owners.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation_display() {
        assert_eq!(Propagation::Required.to_string(), "REQUIRED");
        assert_eq!(Propagation::RequiresNew.to_string(), "REQUIRES_NEW");
        assert_eq!(Propagation::Mandatory.to_string(), "MANDATORY");
    }

    #[test]
    fn test_error_messages_name_the_operation() {
        let err = TxError::NoActiveTransaction("create_invoice");
        assert_eq!(err.to_string(), "create_invoice requires an active transaction");

        let err = TxError::ActiveTransaction("list_customers");
        assert_eq!(
            err.to_string(),
            "list_customers must not be called inside an active transaction"
        );
    }
}
