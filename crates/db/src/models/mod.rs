//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs consumed by the API layer
//! - `Serialize` response DTOs where a handler returns more than a row

pub mod document;
pub mod revision;
