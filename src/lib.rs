pub mod config;
pub mod logging;
pub mod sections;
pub mod ui;
