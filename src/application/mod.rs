//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `HiringEngine` which turns hire/unhire intents
//! into guarded two-write transactions against the wallet and crew stores.

pub mod engine;
pub mod runner;
