//! Empathy Coach - Adaptive Relationship Communication Training
//!
//! This crate implements the adaptive training session engine: guided
//! empathy scenarios, turn-by-turn dialogue with an AI-simulated partner,
//! rubric-based response evaluation, and tiered content entitlement.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
