//! codecanvas - Elm-style code screenshot canvas
//!
//! This crate provides the state model, update logic and rendering pipeline
//! for turning a code snippet into a styled PNG, implementing the Elm
//! Architecture pattern.

pub mod background;
pub mod cli;
pub mod clipboard;
pub mod color;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod filename;
pub mod language;
pub mod messages;
pub mod model;
pub mod raster;
pub mod runtime;
pub mod scheduler;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod upload;
pub mod util;
pub mod widget;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AppConfig;
pub use messages::Msg;
pub use model::{AppModel, EditorState};
pub use runtime::Runtime;
