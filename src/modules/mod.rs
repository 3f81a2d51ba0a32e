//! Modules layer - Infrastructure components outside the HTTP features
//!
//! Contains adapters that produce artifacts on local storage.

pub mod summary;
