//! Durable local storage for the Arcvault wallet
//!
//! Holds the single encrypted wallet record and the unlock-attempt
//! counter in a SQLite database under the platform data directory. The
//! record is AES-256-GCM encrypted before it reaches this layer; the
//! database itself only ever sees ciphertext, the derived public key,
//! and bookkeeping fields.
//!
//! Nothing stored here is ever transmitted; the store is private to the
//! application data directory and survives restarts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attempts;
pub mod config;
pub mod database;
pub mod error;
pub mod wallet_store;

pub use attempts::{AttemptCounter, MAX_UNLOCK_ATTEMPTS};
pub use config::default_db_path;
pub use database::Database;
pub use error::{Error, Result};
pub use wallet_store::{WalletStore, ACTIVE_WALLET_SLOT};
