use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::topic::Topics;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub http_addr: String,
    pub namespace: Option<String>,
    pub trace_instance: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_home = env::var("XDG_DATA_HOME").ok();

        let data_root = data_home
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(home).join(".local/share"));

        Self {
            db_path: data_root.join("skyingest/skyingest.duckdb"),
            http_addr: "127.0.0.1:11800".to_string(),
            namespace: None,
            trace_instance: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides);
        }
        apply_overrides(&mut cfg, load_env_overrides());
        Ok(cfg)
    }

    /// Checks the settings the ingester cannot start without.
    pub fn validate(&self) -> Result<()> {
        if self.trace_instance.trim().is_empty() {
            return Err(IngestError::Config(
                "missing trace_instance (set SKYINGEST_TRACE_INSTANCE or --trace-instance)"
                    .to_string(),
            ));
        }
        if self.http_addr.trim().is_empty() {
            return Err(IngestError::Config("missing http_addr".to_string()));
        }
        Ok(())
    }

    pub fn topics(&self) -> Topics {
        Topics::new(self.namespace.as_deref())
    }

    pub fn trace_logstore(&self) -> String {
        format!("{}-traces", self.trace_instance)
    }

    pub fn metric_logstore(&self) -> String {
        format!("{}-metrics", self.trace_instance)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    db_path: Option<PathBuf>,
    http_addr: Option<String>,
    namespace: Option<String>,
    trace_instance: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("SKYINGEST_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("skyingest/config.toml")
}

fn load_file_overrides(path: &PathBuf) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| IngestError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed = parse_overrides(&raw)
        .map_err(|e| IngestError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn parse_overrides(raw: &str) -> std::result::Result<ConfigOverrides, toml::de::Error> {
    toml::from_str(raw)
}

fn load_env_overrides() -> ConfigOverrides {
    ConfigOverrides {
        db_path: env::var("SKYINGEST_DB_PATH").ok().map(PathBuf::from),
        http_addr: env::var("SKYINGEST_HTTP_ADDR").ok(),
        namespace: env::var("SKYINGEST_NAMESPACE").ok(),
        trace_instance: env::var("SKYINGEST_TRACE_INSTANCE").ok(),
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides) {
    if let Some(v) = overrides.db_path {
        cfg.db_path = v;
    }
    if let Some(v) = overrides.http_addr {
        cfg.http_addr = v;
    }
    if let Some(v) = overrides.namespace {
        cfg.namespace = Some(v).filter(|ns| !ns.is_empty());
    }
    if let Some(v) = overrides.trace_instance {
        cfg.trace_instance = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_expected_addr() {
        let cfg = Config::default();
        assert_eq!(cfg.http_addr, "127.0.0.1:11800");
        assert_eq!(cfg.namespace, None);
    }

    #[test]
    fn validate_requires_trace_instance() {
        let cfg = Config::default();
        assert!(matches!(cfg.validate(), Err(IngestError::Config(_))));

        let cfg = Config {
            trace_instance: "apm".to_string(),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn derives_logstores_and_topics() {
        let cfg = Config {
            namespace: Some("staging".to_string()),
            trace_instance: "apm".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.trace_logstore(), "apm-traces");
        assert_eq!(cfg.metric_logstore(), "apm-metrics");
        assert_eq!(cfg.topics().segment, "staging-skywalking-segments");
    }

    #[test]
    fn apply_file_overrides_updates_fields() {
        let mut cfg = Config::default();
        let file = parse_overrides(
            r#"
            http_addr = "0.0.0.0:9000"
            namespace = "prod"
            trace_instance = "apm"
            "#,
        )
        .unwrap();

        apply_overrides(&mut cfg, file);

        assert_eq!(cfg.http_addr, "0.0.0.0:9000");
        assert_eq!(cfg.namespace.as_deref(), Some("prod"));
        assert_eq!(cfg.trace_instance, "apm");
    }

    #[test]
    fn empty_namespace_override_clears_prefix() {
        let mut cfg = Config {
            namespace: Some("prod".to_string()),
            ..Config::default()
        };
        apply_overrides(
            &mut cfg,
            ConfigOverrides {
                namespace: Some(String::new()),
                ..ConfigOverrides::default()
            },
        );
        assert_eq!(cfg.namespace, None);
    }
}
