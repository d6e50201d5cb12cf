//! Family Benefit Engine for the Australian Family Tax Benefit
//!
//! This crate calculates Family Tax Benefit Part A and Part B entitlements
//! from a household description and a dated rate table, solves the income
//! thresholds at which payments change, and records an audit trace of every
//! rule applied.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
