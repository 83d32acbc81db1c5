//! Active wallet record storage
//!
//! CRUD over the single fixed `active_wallet` slot. The app models one
//! wallet per device; replacing the record is the only way to change
//! wallets. The record is stored as the same JSON the portable keystore
//! format uses.

use crate::{Database, Error, Result};
use arcvault_core::{EncryptedWalletRecord, RecordPatch};
use rusqlite::{params, OptionalExtension};

/// Fixed storage slot for the active wallet
pub const ACTIVE_WALLET_SLOT: &str = "active_wallet";

/// Wallet record storage operations
pub struct WalletStore<'a> {
    db: &'a Database,
}

impl<'a> WalletStore<'a> {
    /// Create new wallet store
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a record in the active slot, replacing any previous record.
    pub fn store(&self, record: &EncryptedWalletRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        self.db.conn().execute(
            r#"
            INSERT INTO wallet (slot, record, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(slot) DO UPDATE SET record = ?2, updated_at = ?3
            "#,
            params![ACTIVE_WALLET_SLOT, json, updated_at],
        )?;

        tracing::debug!("Wallet record stored");
        Ok(())
    }

    /// Load the active wallet record, if one exists.
    pub fn get(&self) -> Result<Option<EncryptedWalletRecord>> {
        let json: Option<String> = self
            .db
            .conn()
            .query_row(
                "SELECT record FROM wallet WHERE slot = ?1",
                params![ACTIVE_WALLET_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update to the stored record and return the result.
    ///
    /// `createdAt` is preserved and `version` pinned by the record's own
    /// merge semantics.
    pub fn update(&self, patch: RecordPatch) -> Result<EncryptedWalletRecord> {
        let mut record = self
            .get()?
            .ok_or_else(|| Error::NotFound("No active wallet".to_string()))?;

        record.apply(patch);
        self.store(&record)?;
        Ok(record)
    }

    /// Delete the active wallet record.
    pub fn delete(&self) -> Result<()> {
        self.db.conn().execute(
            "DELETE FROM wallet WHERE slot = ?1",
            params![ACTIVE_WALLET_SLOT],
        )?;
        tracing::debug!("Wallet record deleted");
        Ok(())
    }

    /// Existence check without loading the record contents.
    pub fn has_wallet(&self) -> Result<bool> {
        let count: i64 = self.db.conn().query_row(
            "SELECT COUNT(*) FROM wallet WHERE slot = ?1",
            params![ACTIVE_WALLET_SLOT],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
