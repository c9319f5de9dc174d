use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::LanguageSet;

pub const CONFIG_FILE_NAME: &str = ".uixmlrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_input_root")]
    pub input_root: String,
    #[serde(default = "default_template_root")]
    pub template_root: String,
    #[serde(default = "default_output_root")]
    pub output_root: String,
    #[serde(default = "default_properties_root")]
    pub properties_root: String,
    #[serde(default = "default_workbook")]
    pub workbook: String,
    #[serde(default = "default_document_pattern")]
    pub document_pattern: String,
}

fn default_languages() -> Vec<String> {
    ["ENG", "CHS", "CHT"].map(String::from).to_vec()
}

fn default_input_root() -> String {
    "./uixml/input".to_string()
}

fn default_template_root() -> String {
    "./uixml/template".to_string()
}

fn default_output_root() -> String {
    "./uixml/output".to_string()
}

fn default_properties_root() -> String {
    "./properties".to_string()
}

fn default_workbook() -> String {
    "./uixml/labels.json".to_string()
}

fn default_document_pattern() -> String {
    "*.xml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            input_root: default_input_root(),
            template_root: default_template_root(),
            output_root: default_output_root(),
            properties_root: default_properties_root(),
            workbook: default_workbook(),
            document_pattern: default_document_pattern(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if the document pattern is not a valid glob or the
    /// language list is empty, blank or has duplicates.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.document_pattern).with_context(|| {
            format!(
                "Invalid glob pattern in 'documentPattern': \"{}\"",
                self.document_pattern
            )
        })?;
        self.language_set()?;
        Ok(())
    }

    pub fn language_set(&self) -> Result<LanguageSet> {
        LanguageSet::new(self.languages.iter().cloned()).context("Invalid 'languages' setting")
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
    /// Directory relative paths in the config resolve against: the config
    /// file's directory, or the start directory when no file was found.
    pub root: PathBuf,
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
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
