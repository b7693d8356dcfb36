//! Configuration for the Pathwise CLI.
//!
//! Provides the [`PathwiseConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `PATHWISE_CONFIG` environment variable
//! 3. XDG default: `~/.config/pathwise/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use pathwise_core::traits::ConfigProvider;
use pathwise_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// Hop cutoff used by `related` when none is configured.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Pathwise CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwiseConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path for all project data.
    pub base_path: Option<String>,

    /// Concept dataset location.
    pub dataset: DatasetConfig,

    /// Query defaults.
    pub query: QueryConfig,
}

/// Concept dataset configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the concept JSON document.
    pub path: Option<String>,
}

/// Query defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Hop cutoff for `related` queries.
    #[serde(deserialize_with = "number_or_string")]
    pub max_distance: usize,
}

/// Accept a number or a string holding one; env overlays arrive as strings.
fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for PathwiseConfig {
    fn default() -> Self {
        Self {
            project_name: "pathwise".to_string(),
            base_path: None,
            dataset: DatasetConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl PathwiseConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped. Environment
    /// variables overlay the top level and the `[dataset]` and `[query]`
    /// sections.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            tracing::debug!("Loading config from {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level("PATHWISE");
        env_opts.add_section("dataset");
        env_opts.add_section("query");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("PATHWISE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pathwise").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `PATHWISE_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "PATHWISE", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for PathwiseConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn dataset_path(&self) -> Result<PathBuf> {
        match &self.dataset.path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(self.base_path()?.join("data").join("concepts.json")),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, env_lock};
    use std::collections::HashMap;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_pathwise_config_default() {
        let config = PathwiseConfig::default();
        assert_eq!(config.project_name, "pathwise");
        assert!(config.base_path.is_none());
        assert!(config.dataset.path.is_none());
        assert_eq!(config.query.max_distance, DEFAULT_MAX_DISTANCE);
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_pathwise_config_from_toml() {
        let toml_str = r#"
            project_name = "tutor"
            base_path = "/data"

            [dataset]
            path = "/data/math.json"

            [query]
            max_distance = 3
        "#;

        let config: PathwiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "tutor");
        assert_eq!(config.base_path.as_deref(), Some("/data"));
        assert_eq!(config.dataset.path.as_deref(), Some("/data/math.json"));
        assert_eq!(config.query.max_distance, 3);
    }

    #[test]
    fn test_pathwise_config_partial_toml_uses_defaults() {
        let config: PathwiseConfig = toml::from_str("project_name = \"tutor\"").unwrap();
        assert_eq!(config.project_name, "tutor");
        assert_eq!(config.query.max_distance, DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn test_pathwise_config_to_toml() {
        let config = PathwiseConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"pathwise\""));
        assert!(toml_str.contains("[query]"));
        assert!(toml_str.contains("max_distance = 2"));

        let parsed: PathwiseConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.project_name, config.project_name);
        assert_eq!(parsed.query.max_distance, config.query.max_distance);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_pathwise_config_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
                project_name = "loaded"
                [query]
                max_distance = 4
            "#,
        );

        let _lock = env_lock();
        let config = PathwiseConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.query.max_distance, 4);
    }

    #[test]
    fn test_pathwise_config_load_defaults() {
        let _lock = env_lock();
        let config = PathwiseConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "pathwise");
        assert_eq!(config.query.max_distance, DEFAULT_MAX_DISTANCE);
    }

    #[test]
    fn test_pathwise_config_load_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
                [dataset]
                path = "/from/file.json"
            "#,
        );

        let _guard = EnvGuard::new("PATHWISE_DATASET_PATH", "/from/env.json");
        let config = PathwiseConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.dataset.path.as_deref(), Some("/from/env.json"));
    }

    #[test]
    fn test_pathwise_config_load_query_env_overlay() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
                [query]
                max_distance = 4
            "#,
        );

        let _guard = EnvGuard::new("PATHWISE_QUERY_MAX_DISTANCE", "5");
        let config = PathwiseConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.query.max_distance, 5);
    }

    #[test]
    fn test_pathwise_config_env_vars_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let empty = write_config(&dir, "");
        let config = PathwiseConfig {
            query: QueryConfig { max_distance: 7 },
            ..Default::default()
        };
        let vars: HashMap<_, _> = config.to_env_vars().unwrap().into_iter().collect();

        let _guard = EnvGuard::new(
            "PATHWISE_QUERY_MAX_DISTANCE",
            &vars["PATHWISE_QUERY_MAX_DISTANCE"],
        );
        let loaded = PathwiseConfig::load(Some(empty.to_str().unwrap())).unwrap();
        assert_eq!(loaded.query.max_distance, 7);
    }

    #[test]
    fn test_query_max_distance_rejects_non_numeric_string() {
        let result: std::result::Result<PathwiseConfig, _> =
            toml::from_str("[query]\nmax_distance = \"far\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_query_max_distance_accepts_numeric_string() {
        let config: PathwiseConfig = toml::from_str("[query]\nmax_distance = \"3\"").unwrap();
        assert_eq!(config.query.max_distance, 3);
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = PathwiseConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _guard = EnvGuard::new("PATHWISE_CONFIG", "/env/config.toml");
        let path = PathwiseConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_default_config_path() {
        let path = PathwiseConfig::default_config_path().unwrap();
        assert!(path.ends_with("pathwise/config.toml"));
    }

    // ------------------------------------------------------------------------
    // ConfigProvider tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_provider_project_name() {
        let config = PathwiseConfig {
            project_name: "tutor".into(),
            ..Default::default()
        };
        assert_eq!(config.project_name(), "tutor");
    }

    #[test]
    fn test_provider_base_path() {
        let config = PathwiseConfig {
            base_path: Some("/my/data".into()),
            ..Default::default()
        };
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/my/data"));
    }

    #[test]
    fn test_provider_base_path_default() {
        let config = PathwiseConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_provider_dataset_path_from_base() {
        let config = PathwiseConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(
            config.dataset_path().unwrap(),
            PathBuf::from("/project/data/concepts.json")
        );
    }

    #[test]
    fn test_provider_dataset_path_explicit() {
        let config = PathwiseConfig {
            dataset: DatasetConfig {
                path: Some("/custom/math.json".into()),
            },
            ..Default::default()
        };
        assert_eq!(
            config.dataset_path().unwrap(),
            PathBuf::from("/custom/math.json")
        );
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_pathwise_config_to_env_vars() {
        let config = PathwiseConfig {
            dataset: DatasetConfig {
                path: Some("/data/math.json".into()),
            },
            ..Default::default()
        };
        let map: HashMap<_, _> = config.to_env_vars().unwrap().into_iter().collect();
        assert_eq!(map.get("PATHWISE_PROJECT_NAME").unwrap(), "pathwise");
        assert_eq!(map.get("PATHWISE_DATASET_PATH").unwrap(), "/data/math.json");
        assert_eq!(map.get("PATHWISE_QUERY_MAX_DISTANCE").unwrap(), "2");
        assert!(!map.contains_key("PATHWISE_BASE_PATH"));
    }

    #[test]
    fn test_pathwise_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PathwiseConfig>();
    }
}
