pub mod session;
pub mod worker;

pub use session::{Command, Drawer, DrawerTab, Outcome, Session};
