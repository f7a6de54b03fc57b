//! Data models for the extraction pipeline.

pub mod config;
pub mod expense;
