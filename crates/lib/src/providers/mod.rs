//! # Providers
//!
//! Clients for the external services the pipeline depends on.

pub mod ai;
