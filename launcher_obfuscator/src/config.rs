use config as config_rs;
use serde::Deserialize;
use thiserror::Error;

/// Prefix for environment overrides, e.g. `LAUNCHER_OBF_STRIP_TOOL=/usr/bin/strip`.
pub const ENV_PREFIX: &str = "LAUNCHER_OBF";

#[derive(Debug, Clone, Deserialize)]
pub struct ObfuscatorConfig {
    /// Length in characters of every generated identifier.
    pub identifier_length: usize,
    /// Two-letter tag marking identifiers eligible for renaming.
    pub tag_prefix: String,
    /// Comment that marks where anti-debug launches are injected.
    pub check_marker: String,
    pub strip_tool: String,
    pub sed_tool: String,
    pub tool_timeout_secs: u64,
    pub tool_retries: u32,
    /// Literals (with delimiters) that are inlined verbatim instead of encoded.
    #[serde(default)]
    pub preserved_literals: Vec<String>,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        Self {
            identifier_length: 128,
            tag_prefix: "ob".to_string(),
            check_marker: "// OB_CHECK".to_string(),
            strip_tool: "strip".to_string(),
            sed_tool: "sed".to_string(),
            tool_timeout_secs: 120,
            tool_retries: 1,
            preserved_literals: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ObfuscatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identifier_length == 0 {
            return Err(ConfigError::Invalid {
                field: "identifier_length",
                reason: "must be at least 1".into(),
            });
        }
        if self.tag_prefix.is_empty()
            || !self.tag_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::Invalid {
                field: "tag_prefix",
                reason: format!("{:?} is not a non-empty alphanumeric prefix", self.tag_prefix),
            });
        }
        if self.check_marker.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "check_marker",
                reason: "must not be blank".into(),
            });
        }
        Ok(())
    }
}

/// Layered configuration: built-in defaults, then an optional file, then
/// `LAUNCHER_OBF_*` environment variables.
pub fn load_config(path: Option<&str>) -> Result<ObfuscatorConfig, ConfigError> {
    let defaults = ObfuscatorConfig::default();

    let mut builder = config_rs::Config::builder()
        .set_default("identifier_length", defaults.identifier_length as u64)?
        .set_default("tag_prefix", defaults.tag_prefix)?
        .set_default("check_marker", defaults.check_marker)?
        .set_default("strip_tool", defaults.strip_tool)?
        .set_default("sed_tool", defaults.sed_tool)?
        .set_default("tool_timeout_secs", defaults.tool_timeout_secs)?
        .set_default("tool_retries", defaults.tool_retries as u64)?;

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::with_name(path));
    }

    builder = builder.add_source(
        config_rs::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("preserved_literals"),
    );

    let cfg: ObfuscatorConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}
