//! Trait seams: the pluggable stemmer contract and cooperative cancellation.

pub mod cancellation;
pub mod stemmer;

pub use cancellation::{Cancellable, CancellationToken};
pub use stemmer::Stem;
