use super::*;
use crate::diagnostics::ConfigError;
use crate::file_utils::safe_read_file;
use std::path::Path;

/// File names searched for during implicit discovery, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".toolvet.toml",
    "toolvet.toml",
    ".toolvet.json",
    ".toolvet.yaml",
    ".toolvet.yml",
];

/// Load and parse a config file. The format follows the extension; files
/// without a recognized extension are read as TOML.
pub fn load_config_file(path: &Path) -> Result<UserConfig, ConfigError> {
    let content = safe_read_file(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Search `start_dir` and its ancestors for the first config file.
pub fn discover_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Load the user config for a run.
///
/// An explicit path must exist and parse; any failure is returned. Without
/// an explicit path, discovery starts at `start_dir`; finding nothing, or
/// failing to read what was found, falls back to an empty user config.
pub fn load_user_config(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<(UserConfig, ConfigSource), ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let config = load_config_file(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    let Some(found) = discover_config(start_dir) else {
        tracing::debug!(start = %start_dir.display(), "no config file found, using defaults");
        return Ok((UserConfig::default(), ConfigSource::Default));
    };

    match load_config_file(&found) {
        Ok(config) => {
            tracing::debug!(path = %found.display(), "using discovered config");
            Ok((config, ConfigSource::Discovered(found)))
        }
        Err(e) => {
            tracing::debug!(path = %found.display(), error = %e, "ignoring unreadable discovered config");
            Ok((UserConfig::default(), ConfigSource::Default))
        }
    }
}
