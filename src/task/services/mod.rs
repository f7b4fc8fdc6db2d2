//! Application services for task management.

mod error;
mod management;
mod requests;

pub use error::{TaskErrorKind, TaskServiceError, TaskServiceResult};
pub use management::TaskManagementService;
pub use requests::{CreateTaskRequest, TaskListFilters, TaskPriorityItem, UpdateTaskRequest};
