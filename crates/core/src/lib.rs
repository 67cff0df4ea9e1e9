//! Core for the catalogue project.
//!
//! Pure domain types, validation rules and the collaborator traits the server
//! composes. The only component with behavior of its own is
//! [`catalogue::CatalogueCache`], the tag-invalidated read-through cache that
//! sits in front of a [`storage::CatalogueStore`].

pub mod auth;
pub mod cache;
pub mod catalogue;
pub mod serde;
pub mod storage;
