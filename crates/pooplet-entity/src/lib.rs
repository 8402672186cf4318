//! # pooplet-entity
//!
//! Domain entity models for Pooplet. Every struct in this crate is a
//! value owned by the persistence collaborator and handed to the auth
//! core by value. All entities derive `Debug`, `Clone`, `Serialize`,
//! and `Deserialize`.

pub mod user;
