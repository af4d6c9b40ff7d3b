//! Cabledrop Core - Domain models, configuration and file formats
//!
//! This crate holds everything the generator reads and writes: the site
//! models, the layered configuration, and the KML/GeoJSON formats.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

pub use error::{CabledropError, Result};
