//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the storage adapters uploaded files are written to.

pub mod storage;
