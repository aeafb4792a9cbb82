pub mod builder;
pub mod engine;

pub use builder::{ResolvedFormulation, SampleBuilder};
pub use engine::{generate_freeze_thaw, generate_stability, generate_transportation};
