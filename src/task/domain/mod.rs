//! Domain model for task management.
//!
//! The task domain models validated task fields, partial updates, reorder
//! assignments and store-agnostic query filters while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod filter;
mod ids;
mod patch;
mod task;

pub use error::TaskDomainError;
pub use filter::{TaskFilter, TaskOrder};
pub use ids::{Priority, TaskId, TaskTitle};
pub use patch::{PriorityAssignment, TaskPatch};
pub use task::{NewTask, PersistedTaskData, Task};
