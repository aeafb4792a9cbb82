//! Sample generation engine for stability studies.
//!
//! [`generator`] holds the pure expansion rules, [`collector`] gates and
//! normalizes study requests before they reach the generator,
//! [`session::SampleSession`] accumulates generated samples, and [`export`]
//! writes them out for LIMS import.

pub mod collector;
pub mod error;
pub mod export;
pub mod generator;
pub mod session;
