pub mod base;
pub mod dispatch;
pub mod global;
pub mod outcome;
pub mod report;

pub use base::ChainBase;
pub use dispatch::Dispatcher;
pub use outcome::Outcome;
pub use report::{DispatchReport, InvocationRecord, InvocationStatus};
