pub mod event;
pub mod task;

pub use event::*;
pub use task::*;
