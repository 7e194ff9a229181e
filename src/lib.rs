pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{
    dashboard::DashboardSummary, debounce::Debouncer, directory::HttpUserDirectory,
    flow::AccountFlow, search::SearchEngine, store::MunicipalStore,
};
pub use domain::model::{Municipality, NewUser, User};
pub use utils::error::{Result, SaudeError};
