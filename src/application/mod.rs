//! Application services (use cases).
//!
//! These services orchestrate domain logic: pricing a single request,
//! tuning the scoring weights offline, and comparing internal quotes.

pub mod comparison;
pub mod pricing;
pub mod tuning;
