use crate::config::RenderSettings;
use crate::domain::model::RenderFormat;
use crate::utils::error::Result;
use crate::utils::validation::validate_one_of;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "elmkit")]
#[command(about = "Normalize chat messages into LLM request payloads")]
pub struct CliConfig {
    /// JSON file holding a string, a message, a list of messages or a full payload
    #[arg(short, long)]
    pub input: Option<String>,

    /// Where to write the rendered payload
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: normalized or openai
    #[arg(long)]
    pub format: Option<String>,

    /// Lift the first system message into `instructions` (openai format)
    #[arg(long, overrides_with = "no_use_instructions")]
    pub use_instructions: bool,

    /// Keep every system message in `messages`, even if the config enables lifting
    #[arg(long, overrides_with = "use_instructions")]
    pub no_use_instructions: bool,

    /// Keep `meta` on messages instead of stripping it
    #[arg(long, overrides_with = "strip_meta")]
    pub keep_meta: bool,

    /// Strip `meta` from messages, even if the config keeps it
    #[arg(long, overrides_with = "keep_meta")]
    pub strip_meta: bool,

    /// Pretty-print the output JSON
    #[arg(long, overrides_with = "no_pretty")]
    pub pretty: bool,

    /// Write compact JSON, even if the config enables pretty output
    #[arg(long, overrides_with = "pretty")]
    pub no_pretty: bool,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定；成對旗標以最後出現者為準，未指定時沿用原值
    pub fn apply_to(&self, settings: &mut RenderSettings) -> Result<()> {
        if let Some(input) = &self.input {
            settings.input_path = Some(input.clone());
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        if let Some(format) = &self.format {
            let normalized = format.to_ascii_lowercase();
            validate_one_of("--format", &normalized, &RenderFormat::VALUES)?;
            settings.format = RenderFormat::parse(&normalized).unwrap_or_default();
        }
        if let Some(value) = flag_pair(self.use_instructions, self.no_use_instructions) {
            settings.use_instructions = value;
        }
        if let Some(value) = flag_pair(self.strip_meta, self.keep_meta) {
            settings.strip_meta = value;
        }
        if let Some(value) = flag_pair(self.pretty, self.no_pretty) {
            settings.pretty = value;
        }
        Ok(())
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let cli = CliConfig::parse_from([
            "elmkit",
            "--input",
            "chat.json",
            "--format",
            "OpenAI",
            "--use-instructions",
            "--keep-meta",
        ]);
        let mut settings = RenderSettings::default();
        cli.apply_to(&mut settings).unwrap();

        assert_eq!(settings.input_path.as_deref(), Some("chat.json"));
        assert_eq!(settings.format, RenderFormat::OpenAi);
        assert!(settings.use_instructions);
        assert!(!settings.strip_meta);
        assert!(!settings.pretty);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let cli = CliConfig::parse_from(["elmkit", "--format", "xml"]);
        let mut settings = RenderSettings::default();
        assert!(cli.apply_to(&mut settings).is_err());
    }

    #[test]
    fn test_cli_keeps_toml_values_when_absent() {
        let cli = CliConfig::parse_from(["elmkit"]);
        let mut settings = RenderSettings {
            input_path: Some("from_toml.json".to_string()),
            pretty: true,
            ..RenderSettings::default()
        };
        cli.apply_to(&mut settings).unwrap();
        assert_eq!(settings.input_path.as_deref(), Some("from_toml.json"));
        assert!(settings.pretty);
    }

    #[test]
    fn test_cli_switches_toml_values_off() {
        let cli = CliConfig::parse_from([
            "elmkit",
            "--no-use-instructions",
            "--strip-meta",
            "--no-pretty",
        ]);
        let mut settings = RenderSettings {
            use_instructions: true,
            strip_meta: false,
            pretty: true,
            ..RenderSettings::default()
        };
        cli.apply_to(&mut settings).unwrap();

        assert!(!settings.use_instructions);
        assert!(settings.strip_meta);
        assert!(!settings.pretty);
    }

    #[test]
    fn test_last_flag_of_a_pair_wins() {
        let cli = CliConfig::parse_from([
            "elmkit",
            "--pretty",
            "--no-pretty",
            "--strip-meta",
            "--keep-meta",
        ]);
        let mut settings = RenderSettings::default();
        cli.apply_to(&mut settings).unwrap();

        assert!(!settings.pretty);
        assert!(!settings.strip_meta);
    }
}
