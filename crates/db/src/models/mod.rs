//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity matching the table and the
//! insert DTO used by its repository.

pub mod user;
pub mod watched_item;
