//! In-memory adapters for task management.

mod clock;
mod task;

pub use clock::ManualClock;
pub use task::InMemoryTaskRepository;
