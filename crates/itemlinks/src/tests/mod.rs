//! Scenario and property tests for the link layer.
//!
//! - `integration.rs`: end-to-end sessions covering rendering, per-turn
//!   reconciliation, clicks and game end
//! - `properties.rs`: `proptest` properties over random worlds, transcripts
//!   and click sequences
//! - `helpers.rs`: sample world and session setup

mod helpers;
mod properties;
