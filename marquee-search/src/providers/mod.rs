//! Catalog backends that do not talk to OMDb.

pub mod demo;

pub use demo::DemoCatalog;
