//! Arcvault wallet core
//!
//! This crate implements the vault's domain logic: BIP-39 seed phrase
//! generation and validation, Argon2id key derivation, AES-256-GCM seed
//! encryption, the encrypted wallet record format, and account key
//! derivation for signing.
//!
//! ## Security Features
//!
//! - **Seed Encryption**: AES-256-GCM over the UTF-8 mnemonic, fresh
//!   12-byte nonce per encryption
//! - **Passphrase KDF**: Argon2id with 64 MiB memory, 3 iterations,
//!   1 lane, parameters versioned by record format tag
//! - **Memory Hygiene**: seed, password, and key material held in
//!   zeroizing containers
//! - **Portable Keystore**: JSON backup format carrying only the
//!   encrypted record

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod error;
pub mod kdf;
pub mod mnemonic;
pub mod record;
pub mod signer;

pub use cipher::{SealedSeed, NONCE_LEN};
pub use error::{Error, Result};
pub use kdf::{derive_key, generate_salt, KdfParams, VaultKey, CURRENT_VERSION, SALT_LEN};
pub use mnemonic::{SeedPhrase, GENERATED_WORD_COUNT};
pub use record::{EncryptedWalletRecord, RecordPatch};
pub use signer::AccountKeypair;
