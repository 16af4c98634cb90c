pub mod api;
pub mod cli;
pub mod config;
pub mod model;
pub mod ops;
pub mod store;
pub mod sync;
pub mod tui;
pub mod util;
