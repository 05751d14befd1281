pub mod adapters;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::{LocalStorage, MemoryRegistrationStore};
pub use client::{HttpRegistrationClient, Notice, RegistrationForm, Screen, ViewController, ViewState};
pub use config::AppConfig;
pub use crate::core::{FlowResult, RegistrationFlow};
pub use domain::{PassId, RegistrationRecord, RegistrationRequest};
pub use render::{PassExporter, PassView};
pub use utils::error::{PassError, Result};
