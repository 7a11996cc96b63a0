//! Pagecraft Application
//!
//! Command-line host around the canvas: argument parsing, configuration,
//! persistence of the working page and export to files.

mod app;
pub mod cli;
mod config;
mod error;

pub use app::App;
pub use cli::{Cli, Command, ExportFormat};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
