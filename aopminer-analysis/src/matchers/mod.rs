//! Matchers: AOD substring matching and KE plausibility scoring.

pub mod aod;
pub mod key_event;
