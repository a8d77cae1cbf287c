//! Domain logic for the Folio revision service.
//!
//! Everything here is pure and free of I/O; `folio-db` and `folio-api` build
//! on these types.

pub mod compare;
pub mod diff;
pub mod document;
pub mod error;
pub mod pagination;
pub mod revision;
pub mod types;
