use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./inventory-seed.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("inventory_source.txt")
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_categories_file")]
    pub categories_file: String,
    #[serde(default = "default_items_file")]
    pub items_file: String,
    #[serde(default = "default_archive_file")]
    pub archive_file: String,
    /// Leave the loose CSV files next to the archive.
    #[serde(default = "default_keep_csv")]
    pub keep_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            categories_file: default_categories_file(),
            items_file: default_items_file(),
            archive_file: default_archive_file(),
            keep_csv: default_keep_csv(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_categories_file() -> String {
    "categories.csv".to_string()
}
fn default_items_file() -> String {
    "items.csv".to_string()
}
fn default_archive_file() -> String {
    "inventory_seed_data.zip".to_string()
}
fn default_keep_csv() -> bool {
    true
}

impl OutputConfig {
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(&self.archive_file)
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if given; otherwise the default config file when present,
/// falling back to built-in defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

pub fn validate(config: &Config) -> Result<()> {
    let output = &config.output;
    for (key, name) in [
        ("output.categories_file", &output.categories_file),
        ("output.items_file", &output.items_file),
        ("output.archive_file", &output.archive_file),
    ] {
        if name.trim().is_empty() {
            anyhow::bail!("{} must not be empty", key);
        }
        if name.contains('/') || name.contains('\\') {
            anyhow::bail!("{} must be a bare file name, got '{}'", key, name);
        }
    }

    if output.categories_file == output.items_file {
        anyhow::bail!(
            "output.categories_file and output.items_file must differ (both '{}')",
            output.items_file
        );
    }
    if output.archive_file == output.categories_file || output.archive_file == output.items_file {
        anyhow::bail!(
            "output.archive_file '{}' collides with a CSV file name",
            output.archive_file
        );
    }

    Ok(())
}
