#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::RenderFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "payload.json";

/// 合併 TOML 與命令列後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub input_path: Option<String>,
    pub output_path: String,
    pub format: RenderFormat,
    pub use_instructions: bool,
    pub strip_meta: bool,
    pub pretty: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            format: RenderFormat::Normalized,
            use_instructions: false,
            strip_meta: true,
            pretty: false,
        }
    }
}

impl RenderSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            input_path: config.io.input_path.clone(),
            output_path: config
                .io
                .output_path
                .clone()
                .unwrap_or(defaults.output_path),
            format: config.format(),
            use_instructions: config
                .render
                .use_instructions
                .unwrap_or(defaults.use_instructions),
            strip_meta: config.render.strip_meta.unwrap_or(defaults.strip_meta),
            pretty: config.render.pretty.unwrap_or(defaults.pretty),
        }
    }
}

impl ConfigProvider for RenderSettings {
    fn input_path(&self) -> &str {
        self.input_path.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn format(&self) -> RenderFormat {
        self.format
    }

    fn use_instructions(&self) -> bool {
        self.use_instructions
    }

    fn strip_meta(&self) -> bool {
        self.strip_meta
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Validate for RenderSettings {
    fn validate(&self) -> Result<()> {
        let input = validate_required_field("io.input_path", &self.input_path)?;
        validate_path("io.input_path", input)?;
        validate_path("io.output_path", &self.output_path)?;
        Ok(())
    }
}
