//! campfinder — three-stage inference pipeline over raw campground inventory data.
//!
//! Stage order is fixed: [`normalize`] pivots raw per-site records into typed
//! rows, [`rollup`] aggregates them to one row per facility with a camping-type
//! classification, and [`classify`] derives condition categories and display
//! tags from the rollup. Every stage fully rewrites its output tables, so a
//! run over unchanged input is idempotent.

pub mod classify;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod rollup;
pub mod store;
