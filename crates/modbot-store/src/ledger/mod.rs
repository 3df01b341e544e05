//! Ledger file management
//!
//! Replaces a connection pool: each ledger owns one JSON file and serializes
//! every read-modify-write against it.

mod json_file;

pub use json_file::JsonLedger;
