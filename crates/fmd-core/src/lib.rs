//! Validation and checksum tooling for the football match results dataset.

pub mod checksum;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod validate;
