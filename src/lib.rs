//! Capsample: Per-Owner Storage Estimation
//!
//! Estimates how storage capacity is distributed across file owners by drawing
//! capacity-weighted path samples from a cluster, aggregating them into
//! per-owner sample trees, and rendering a pruned directory breakdown.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;
pub mod sampling;
pub mod tooling;
pub mod tree;
