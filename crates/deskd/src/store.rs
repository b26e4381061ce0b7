//! SQLite ticket store and the collision-safe creation protocol.
//!
//! One table keyed by the ticket number; the primary-key constraint is
//! the uniqueness check. Creation draws random 6-digit numbers and
//! retries on collision up to a fixed bound, aborting immediately on any
//! other store error. Collisions surface as a typed `TicketInsert`
//! variant rather than an error so callers branch explicitly.

use desk_common::ticket::{
    Ticket, TicketStatus, TICKET_CREATE_ATTEMPTS, TICKET_NUMBER_MAX, TICKET_NUMBER_MIN,
};
use rand::Rng;
use rusqlite::{ffi, params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Errors from the underlying store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketInsert {
    Inserted,
    /// The drawn ticket number already exists; the row was not written.
    Collision,
}

/// Failure of the bounded creation protocol. Handlers present both
/// variants identically to the user; the split exists for logging.
#[derive(Debug, thiserror::Error)]
pub enum CreateTicketError {
    #[error("no free ticket number found within the attempt bound")]
    Exhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Durable ticket table. The connection mutex serializes inserts when the
/// hosting layer handles messages concurrently; uniqueness itself is
/// enforced by the primary key, not by this lock.
pub struct TicketStore {
    conn: Mutex<Connection>,
}

impl TicketStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, handy for tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Idempotent schema creation, run before every operation so the
    /// table exists no matter which call comes first.
    fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS support_tickets (
                ticket_number INTEGER PRIMARY KEY,
                issue_description TEXT NOT NULL,
                status TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Insert a ticket row. A primary-key violation is reported as
    /// `Collision`, every other failure as `StoreError`.
    pub fn insert_ticket(&self, ticket: &Ticket) -> Result<TicketInsert, StoreError> {
        let conn = self.conn();
        Self::ensure_schema(&conn)?;

        let result = conn.execute(
            "INSERT INTO support_tickets (ticket_number, issue_description, status)
             VALUES (?1, ?2, ?3)",
            params![
                ticket.ticket_number,
                ticket.issue_description,
                ticket.status.as_str()
            ],
        );

        match result {
            Ok(_) => Ok(TicketInsert::Inserted),
            Err(err) if is_unique_violation(&err) => Ok(TicketInsert::Collision),
            Err(err) => Err(err.into()),
        }
    }

    /// Status of a ticket, as stored. `None` when the number is unknown.
    pub fn ticket_status(&self, ticket_number: u32) -> Result<Option<String>, StoreError> {
        let conn = self.conn();
        Self::ensure_schema(&conn)?;

        let result = conn.query_row(
            "SELECT status FROM support_tickets WHERE ticket_number = ?1",
            params![ticket_number],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(status) => Ok(Some(status)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Create a ticket with a fresh unique number and status `Open`.
    ///
    /// Draws uniformly from the 6-digit space, retrying a collision up to
    /// the attempt bound. Any non-collision store error aborts the loop
    /// immediately; nothing is partially written in that case.
    pub fn create_ticket(&self, issue_description: &str) -> Result<u32, CreateTicketError> {
        let mut rng = rand::thread_rng();
        self.create_ticket_with(issue_description, || {
            rng.gen_range(TICKET_NUMBER_MIN..=TICKET_NUMBER_MAX)
        })
    }

    fn create_ticket_with(
        &self,
        issue_description: &str,
        mut draw: impl FnMut() -> u32,
    ) -> Result<u32, CreateTicketError> {
        for attempt in 1..=TICKET_CREATE_ATTEMPTS {
            let candidate = draw();
            let ticket = Ticket {
                ticket_number: candidate,
                issue_description: issue_description.to_string(),
                status: TicketStatus::Open,
            };
            match self.insert_ticket(&ticket)? {
                TicketInsert::Inserted => {
                    debug!("created ticket #{candidate} on attempt {attempt}");
                    return Ok(candidate);
                }
                TicketInsert::Collision => {
                    warn!(
                        "ticket number #{candidate} already taken \
                         (attempt {attempt}/{TICKET_CREATE_ATTEMPTS})"
                    );
                }
            }
        }
        Err(CreateTicketError::Exhausted)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    // Only uniqueness counts as a collision; other constraint failures
    // (NOT NULL, CHECK) are real store errors.
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn temp_store() -> (tempfile::TempDir, TicketStore) {
        let dir = tempdir().unwrap();
        let store = TicketStore::open(&dir.path().join("tickets.db")).unwrap();
        (dir, store)
    }

    fn open_ticket(ticket_number: u32, issue_description: &str) -> Ticket {
        Ticket {
            ticket_number,
            issue_description: issue_description.to_string(),
            status: TicketStatus::Open,
        }
    }

    /// Store whose table is missing a column, so every insert fails with
    /// a non-collision error while schema creation stays a no-op.
    fn broken_store() -> (tempfile::TempDir, TicketStore) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tickets.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute(
                "CREATE TABLE support_tickets (ticket_number INTEGER PRIMARY KEY)",
                [],
            )
            .unwrap();
        }
        let store = TicketStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn schema_is_created_lazily() {
        let (_dir, store) = temp_store();
        // First operation on a fresh database must not fail.
        assert_eq!(store.ticket_status(123456).unwrap(), None);
    }

    #[test]
    fn insert_then_lookup() {
        let (_dir, store) = temp_store();
        let outcome = store
            .insert_ticket(&open_ticket(123456, "card is broken"))
            .unwrap();
        assert_eq!(outcome, TicketInsert::Inserted);
        assert_eq!(
            store.ticket_status(123456).unwrap(),
            Some("Open".to_string())
        );
    }

    #[test]
    fn duplicate_number_reports_collision() {
        let (_dir, store) = temp_store();
        store.insert_ticket(&open_ticket(222222, "first")).unwrap();
        let outcome = store
            .insert_ticket(&open_ticket(222222, "second"))
            .unwrap();
        assert_eq!(outcome, TicketInsert::Collision);
        // The original row is untouched.
        assert_eq!(
            store.ticket_status(222222).unwrap(),
            Some("Open".to_string())
        );
    }

    #[test]
    fn only_uniqueness_failures_count_as_collisions() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO notes (id, body) VALUES (1, 'a')", [])
            .unwrap();

        let duplicate = conn
            .execute("INSERT INTO notes (id, body) VALUES (1, 'b')", [])
            .unwrap_err();
        assert!(is_unique_violation(&duplicate));

        let missing_body = conn
            .execute("INSERT INTO notes (id) VALUES (2)", [])
            .unwrap_err();
        assert!(!is_unique_violation(&missing_body));
    }

    #[test]
    fn create_retries_collisions_then_succeeds() {
        let (_dir, store) = temp_store();
        store.insert_ticket(&open_ticket(333333, "occupied")).unwrap();

        // First four draws collide, fifth is free.
        let mut draws = [333333, 333333, 333333, 333333, 444444].into_iter();
        let number = store
            .create_ticket_with("new issue", || draws.next().unwrap())
            .unwrap();
        assert_eq!(number, 444444);
        assert_eq!(
            store.ticket_status(444444).unwrap(),
            Some("Open".to_string())
        );
    }

    #[test]
    fn create_exhausts_after_bounded_attempts() {
        let (_dir, store) = temp_store();
        store.insert_ticket(&open_ticket(555555, "occupied")).unwrap();

        let mut attempts = 0u32;
        let result = store.create_ticket_with("never fits", || {
            attempts += 1;
            555555
        });
        assert!(matches!(result, Err(CreateTicketError::Exhausted)));
        assert_eq!(attempts, TICKET_CREATE_ATTEMPTS);
    }

    #[test]
    fn create_aborts_on_non_collision_error() {
        let (_dir, store) = broken_store();

        let mut attempts = 0u32;
        let result = store.create_ticket_with("doomed", || {
            attempts += 1;
            666666
        });
        assert!(matches!(result, Err(CreateTicketError::Store(_))));
        // No retry on unrelated store errors.
        assert_eq!(attempts, 1);
    }

    #[test]
    fn random_creation_yields_unique_six_digit_numbers() {
        let (_dir, store) = temp_store();
        let a = store.create_ticket("first").unwrap();
        let b = store.create_ticket("second").unwrap();
        assert_ne!(a, b);
        for n in [a, b] {
            assert!((TICKET_NUMBER_MIN..=TICKET_NUMBER_MAX).contains(&n));
            assert_eq!(store.ticket_status(n).unwrap(), Some("Open".to_string()));
        }
    }

    #[test]
    fn unknown_ticket_reads_as_none() {
        let (_dir, store) = temp_store();
        store.insert_ticket(&open_ticket(777777, "exists")).unwrap();
        assert_eq!(store.ticket_status(777776).unwrap(), None);
    }
}
