pub mod app;
pub mod cache;
pub mod config;
pub mod modal;
pub mod remote;
pub mod routing;
pub mod shared;
pub mod tui;
