use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Catalog files, or directories searched recursively for them.
    #[serde(default)]
    pub catalog_paths: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default = "default_include_bundled")]
    pub include_bundled: bool,
}

fn default_include_bundled() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_paths: Vec::new(),
            ignore_patterns: Vec::new(),
            include_bundled: true,
        }
    }
}

/// `Config.*` in the working directory, overridden by `CMDREF_*` variables.
/// List values in the environment are comma separated.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("CMDREF")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("catalog_paths")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Drop paths nested under another path in the list so nothing is loaded twice.
pub fn non_overlapping_paths(paths: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for path in paths {
        let candidate = Path::new(&path);
        if result.iter().any(|kept| candidate.starts_with(kept)) {
            continue;
        }
        result.retain(|kept| !Path::new(kept).starts_with(candidate));
        result.push(path);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_overlapping_no_overlap() {
        let paths = vec![
            "/srv/catalogs/docker".to_string(),
            "/srv/catalogs/git".to_string(),
            "/home/user/cheats".to_string(),
        ];
        let result = non_overlapping_paths(paths);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_non_overlapping_with_nested_path() {
        let paths = vec![
            "/srv/catalogs/git".to_string(),
            "/srv/catalogs".to_string(),
            "/srv/catalogs/docker/extra.toml".to_string(),
            "/home/user/cheats".to_string(),
        ];
        let result = non_overlapping_paths(paths);
        assert_eq!(
            result,
            vec!["/srv/catalogs".to_string(), "/home/user/cheats".to_string()]
        );
    }

    #[test]
    fn test_default_includes_bundled() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.include_bundled);
        assert!(config.catalog_paths.is_empty());
    }
}
