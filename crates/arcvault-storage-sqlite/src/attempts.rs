//! Unlock attempt counter and throttle policy
//!
//! Tracks consecutive failed unlock attempts for the active wallet slot
//! and blocks the password path once the limit is reached. This is a
//! best-effort local mitigation, not a guarantee: an attacker who
//! controls the device can reset local storage. Its value is slowing
//! down an attacker with transient access to an unlocked device.
//!
//! The counter persists across restarts and is only reset by a
//! successful unlock or by replacing the wallet record.

use crate::{Database, Result};
use rusqlite::{params, OptionalExtension};

/// Failed attempts after which the password path is blocked
pub const MAX_UNLOCK_ATTEMPTS: u32 = 5;

/// Persisted unlock attempt counter for the active wallet slot
pub struct AttemptCounter<'a> {
    db: &'a Database,
}

impl<'a> AttemptCounter<'a> {
    /// Create new attempt counter
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Current consecutive failure count. Implicitly 0 when absent.
    pub fn attempts(&self) -> Result<u32> {
        let count: Option<i64> = self
            .db
            .conn()
            .query_row(
                "SELECT attempts FROM unlock_attempts WHERE slot = ?1",
                params![crate::ACTIVE_WALLET_SLOT],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0).max(0) as u32)
    }

    /// Record a failed unlock and return the new count.
    pub fn record_failure(&self) -> Result<u32> {
        self.db.conn().execute(
            r#"
            INSERT INTO unlock_attempts (slot, attempts)
            VALUES (?1, 1)
            ON CONFLICT(slot) DO UPDATE SET attempts = attempts + 1
            "#,
            params![crate::ACTIVE_WALLET_SLOT],
        )?;

        let count = self.attempts()?;
        tracing::debug!("Failed unlock recorded, attempts={count}");
        Ok(count)
    }

    /// Reset the counter to 0.
    pub fn reset(&self) -> Result<()> {
        self.db.conn().execute(
            "DELETE FROM unlock_attempts WHERE slot = ?1",
            params![crate::ACTIVE_WALLET_SLOT],
        )?;
        Ok(())
    }

    /// Whether a given count blocks further attempts.
    pub fn is_blocked(count: u32) -> bool {
        count >= MAX_UNLOCK_ATTEMPTS
    }

    /// Whether the stored count blocks further attempts.
    pub fn blocked(&self) -> Result<bool> {
        Ok(Self::is_blocked(self.attempts()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let db = Database::open_in_memory().unwrap();
        let counter = AttemptCounter::new(&db);
        assert_eq!(counter.attempts().unwrap(), 0);
        assert!(!counter.blocked().unwrap());
    }

    #[test]
    fn test_record_failure_increments() {
        let db = Database::open_in_memory().unwrap();
        let counter = AttemptCounter::new(&db);

        assert_eq!(counter.record_failure().unwrap(), 1);
        assert_eq!(counter.record_failure().unwrap(), 2);
        assert_eq!(counter.attempts().unwrap(), 2);
    }

    #[test]
    fn test_blocked_at_limit_and_stays_blocked() {
        let db = Database::open_in_memory().unwrap();
        let counter = AttemptCounter::new(&db);

        for n in 1..MAX_UNLOCK_ATTEMPTS {
            counter.record_failure().unwrap();
            assert!(!AttemptCounter::is_blocked(n));
        }

        let count = counter.record_failure().unwrap();
        assert_eq!(count, MAX_UNLOCK_ATTEMPTS);
        assert!(counter.blocked().unwrap());

        // Further failures keep it blocked
        counter.record_failure().unwrap();
        assert!(counter.blocked().unwrap());
    }

    #[test]
    fn test_reset_clears_block() {
        let db = Database::open_in_memory().unwrap();
        let counter = AttemptCounter::new(&db);

        for _ in 0..MAX_UNLOCK_ATTEMPTS {
            counter.record_failure().unwrap();
        }
        assert!(counter.blocked().unwrap());

        counter.reset().unwrap();
        assert_eq!(counter.attempts().unwrap(), 0);
        assert!(!counter.blocked().unwrap());
    }

    #[test]
    fn test_is_blocked_boundary() {
        assert!(!AttemptCounter::is_blocked(MAX_UNLOCK_ATTEMPTS - 1));
        assert!(AttemptCounter::is_blocked(MAX_UNLOCK_ATTEMPTS));
        assert!(AttemptCounter::is_blocked(MAX_UNLOCK_ATTEMPTS + 1));
    }
}
