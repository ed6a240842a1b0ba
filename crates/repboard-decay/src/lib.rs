//! # repboard-decay — Periodic proportional decay.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! - **Proportional decay**: one sweep maps every score to
//!   `floor(points * (10_000 - rate_bps) / 10_000)`.
//! - **Epoch gating**: a sweep is allowed at most once per decay period,
//!   measured from the previous sweep with the caller-supplied clock.

pub mod engine;
pub mod schedule;

pub use engine::DecayEngine;
pub use schedule::DecaySchedule;
