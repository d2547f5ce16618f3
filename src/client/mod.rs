//! Client side of the todo procedures: a data source abstraction with a
//! remote and an in-memory implementation, and the view state driven by it.

mod error;
mod memory;
mod remote;
mod source;
mod view;

pub use error::{ClientError, ClientResult};
pub use memory::MemorySource;
pub use remote::RemoteSource;
pub use source::{SourceMode, TodoSource};
pub use view::{Phase, TodoView, ViewStats};
