//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or a connection already inside a transaction) as the first
//! argument.

pub mod document_repo;
pub mod revision_repo;

pub use document_repo::DocumentRepo;
pub use revision_repo::RevisionRepo;
