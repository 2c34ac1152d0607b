pub mod capacity;
pub mod engine;
pub mod record;

pub use capacity::CapacityTracker;
pub use engine::{simulate, SimulationEngine};
pub use record::{Move, MovementRecord, RecordDisplay, Step};
