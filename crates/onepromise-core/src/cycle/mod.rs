mod engine;

pub use engine::{CycleEngine, CycleState};
