pub mod app;
pub mod async_task;
pub mod catalog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod filter;
pub mod keys;
pub mod main_lib;
pub mod menu;
pub mod navigator;
pub mod router;
pub mod screenshot;
pub mod snapshot;
pub mod test_runner;
pub mod theme;
pub mod ui;

pub use error::{Result, SidebarError};
