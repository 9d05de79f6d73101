//! Scoped transaction helper.
//!
//! # Invariants
//! - A transaction opened here is committed only when the closure returns
//!   `Ok`; an `Err` or a panic rolls it back before control leaves the scope.
//! - Calls made while a transaction is already open join it. The outermost
//!   scope owns commit/rollback, so composed operations stay atomic.

use log::warn;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `f` inside a transaction on `conn`.
///
/// Use `TransactionBehavior::Immediate` for write paths so the write lock is
/// taken up front, and `Deferred` for multi-statement reads that need one
/// consistent snapshot.
pub fn with_transaction<T, E, F>(
    conn: &Connection,
    behavior: TransactionBehavior,
    f: F,
) -> Result<T, E>
where
    E: From<rusqlite::Error>,
    F: FnOnce(&Connection) -> Result<T, E>,
{
    if !conn.is_autocommit() {
        return f(conn);
    }

    let tx = Transaction::new_unchecked(conn, behavior)?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(
                    "event=tx_rollback module=db status=error error={}",
                    rollback_err
                );
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::with_transaction;
    use rusqlite::{Connection, TransactionBehavior};

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL);")
            .unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn commits_when_closure_succeeds() {
        let conn = scratch();
        with_transaction(&conn, TransactionBehavior::Immediate, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1);", [])?;
            Ok::<_, rusqlite::Error>(())
        })
        .unwrap();

        assert_eq!(count(&conn), 1);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn rolls_back_every_statement_when_closure_fails() {
        let conn = scratch();
        let result = with_transaction(&conn, TransactionBehavior::Immediate, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1);", [])?;
            tx.execute("INSERT INTO t (v) VALUES (NULL);", [])?;
            Ok::<_, rusqlite::Error>(())
        });

        assert!(result.is_err());
        assert_eq!(count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn nested_scope_joins_outer_transaction() {
        let conn = scratch();
        let result = with_transaction(&conn, TransactionBehavior::Immediate, |outer| {
            with_transaction(outer, TransactionBehavior::Immediate, |inner| {
                inner.execute("INSERT INTO t (v) VALUES (1);", [])?;
                Ok::<_, rusqlite::Error>(())
            })?;
            assert!(!outer.is_autocommit());
            Err::<(), _>(rusqlite::Error::QueryReturnedNoRows)
        });

        assert!(result.is_err());
        assert_eq!(count(&conn), 0);
    }
}
