//! Always-rollback transaction scope.
//!
//! # Responsibility
//! - Run a unit of work inside one transaction and discard its writes.
//!
//! # Invariants
//! - The transaction is rolled back on success, on `Err`, and on unwind.
//! - The connection is usable again once the scope returns.

use log::{debug, warn};
use rusqlite::{Connection, DropBehavior, Transaction};

/// Runs `work` inside a transaction that is rolled back unconditionally.
///
/// The result of `work` is returned as-is. A rollback failure is reported
/// only when `work` itself succeeded; otherwise the work error wins.
pub fn rollback_scope<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<rusqlite::Error>,
{
    let mut tx = conn.transaction()?;
    // Unwinding out of `work` drops `tx`, which must roll back too.
    tx.set_drop_behavior(DropBehavior::Rollback);
    debug!("event=rollback_scope module=db status=start");

    let outcome = work(&tx);
    match (outcome, tx.rollback()) {
        (Ok(value), Ok(())) => {
            debug!("event=rollback_scope module=db status=ok");
            Ok(value)
        }
        (Ok(_), Err(err)) => {
            warn!("event=rollback_scope module=db status=error error_code=rollback_failed error={err}");
            Err(err.into())
        }
        (Err(err), rollback) => {
            if let Err(rollback_err) = rollback {
                warn!(
                    "event=rollback_scope module=db status=error error_code=rollback_failed error={rollback_err}"
                );
            }
            debug!("event=rollback_scope module=db status=work_failed");
            Err(err)
        }
    }
}
