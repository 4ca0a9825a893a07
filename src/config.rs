use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::options::{
    DEFAULT_COMMENT_PREFIX, DEFAULT_PLURAL_FORM_COUNT, DEFAULT_TEMPLATE_EXTENSION,
    ExtractOptions, FnNames,
};

pub const CONFIG_FILE_NAME: &str = ".gleanrc.json";

pub const DEFAULT_OUTPUT: &str = "messages.pot";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub fn_names: FnNames,
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
    #[serde(default = "default_plural_form_count")]
    pub plural_form_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_bugs_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
}

fn default_includes() -> Vec<String> {
    vec![".".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "mjs", "cjs", "ts", "tsx", DEFAULT_TEMPLATE_EXTENSION]
        .map(String::from)
        .to_vec()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_comment_prefix() -> String {
    DEFAULT_COMMENT_PREFIX.to_string()
}

fn default_plural_form_count() -> usize {
    DEFAULT_PLURAL_FORM_COUNT
}

fn default_template_extension() -> String {
    DEFAULT_TEMPLATE_EXTENSION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            extensions: default_extensions(),
            output: default_output(),
            fn_names: FnNames::default(),
            comment_prefix: default_comment_prefix(),
            plural_form_count: default_plural_form_count(),
            project_id_version: None,
            report_bugs_to: None,
            language: None,
            template_extension: default_template_extension(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or `includes`,
    /// empty function names, or a `pluralFormCount` of 0.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.fn_names.iter().any(|(_, name)| name.is_empty()) {
            bail!("Invalid 'fnNames': function names must not be empty");
        }

        if self.plural_form_count == 0 {
            bail!("Invalid 'pluralFormCount': must be at least 1");
        }

        Ok(())
    }

    /// Library options for an extraction run with this configuration.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            fn_names: self.fn_names.clone(),
            comment_prefix: self.comment_prefix.clone(),
            plural_form_count: self.plural_form_count,
            existing_po: None,
            project_id_version: self.project_id_version.clone(),
            report_bugs_to: self.report_bugs_to.clone(),
            language: self.language.clone(),
            template_extension: self.template_extension.clone(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
