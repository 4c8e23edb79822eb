use crate::domain::model::RenderFormat;
use crate::utils::error::{ElmError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub io: IoConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub format: Option<String>, // "normalized" 或 "openai"
    pub use_instructions: Option<bool>,
    pub strip_meta: Option<bool>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IoConfig {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ElmError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ElmError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MESSAGES_DIR})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ElmError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(format) = &self.render.format {
            validate_one_of(
                "render.format",
                &format.to_ascii_lowercase(),
                &RenderFormat::VALUES,
            )?;
        }

        if let Some(input) = &self.io.input_path {
            validate_path("io.input_path", input)?;
        }
        if let Some(output) = &self.io.output_path {
            validate_path("io.output_path", output)?;
        }

        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
        }

        Ok(())
    }

    pub fn format(&self) -> RenderFormat {
        self.render
            .format
            .as_deref()
            .and_then(RenderFormat::parse)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[render]
format = "openai"
use_instructions = true
pretty = true

[io]
input_path = "messages.json"
output_path = "payload.json"

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.format(), RenderFormat::OpenAi);
        assert_eq!(config.render.use_instructions, Some(true));
        assert_eq!(config.render.strip_meta, None);
        assert_eq!(config.io.input_path.as_deref(), Some("messages.json"));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.format(), RenderFormat::Normalized);
        assert!(config.io.input_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ELMKIT_TEST_INPUT_DIR", "/tmp/conversations");

        let toml_content = r#"
[io]
input_path = "${ELMKIT_TEST_INPUT_DIR}/chat.json"
output_path = "${ELMKIT_TEST_UNSET_VAR}/out.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.io.input_path.as_deref(),
            Some("/tmp/conversations/chat.json")
        );
        assert_eq!(
            config.io.output_path.as_deref(),
            Some("${ELMKIT_TEST_UNSET_VAR}/out.json")
        );

        std::env::remove_var("ELMKIT_TEST_INPUT_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[render]\nformat = \"yaml\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ElmError::InvalidConfigValueError { .. })
        ));

        let config = TomlConfig::from_toml_str("[io]\noutput_path = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[render\nformat ="),
            Err(ElmError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[render]
strip_meta = false

[logging]
json = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.render.strip_meta, Some(false));
        assert!(config.json_logs());
    }
}
