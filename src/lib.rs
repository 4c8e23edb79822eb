//! Lightweight LLM toolkit: message primitives, input normalisation and
//! provider payload adapters.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::{toml_config::TomlConfig, RenderSettings};

pub use crate::adapters::LocalStorage;
pub use crate::core::{
    engine::RenderEngine,
    messages::{assistant, developer, msg, system, tool, user},
    normalize::{normalize, normalize_json_str, normalize_value, MessageItem, MessagesIn},
    openai::to_openai,
    pipeline::FilePipeline,
};
pub use crate::domain::model::{Block, Content, Message, Payload, RenderFormat, Role, WireMessage};
pub use crate::utils::error::{ElmError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
