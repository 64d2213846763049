use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BinderError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_REFRESH_HOURS: u64 = 24;
/// 一百年
const MAX_REFRESH_HOURS: u64 = 24 * 365 * 100;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub binder: BinderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub file_records: Option<FileRecordsConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinderConfig {
    pub key_documents_refresh_hours: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub snapshot_ttl_seconds: Option<u64>,
    pub transcript_ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecordsConfig {
    pub endpoint: String,
    pub transcripts_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl FileRecordsConfig {
    /// 逐字稿服務未另外設定時沿用檔案紀錄端點
    pub fn transcripts_endpoint(&self) -> &str {
        self.transcripts_endpoint.as_deref().unwrap_or(&self.endpoint)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| BinderError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${FILE_RECORDS_URL})
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_number_range(
            "binder.key_documents_refresh_hours",
            self.key_documents_refresh_hours(),
            1,
            MAX_REFRESH_HOURS,
        )?;
        if let Some(ttl) = self.cache.snapshot_ttl_seconds {
            validation::validate_positive_number("cache.snapshot_ttl_seconds", ttl, 1)?;
        }
        if let Some(ttl) = self.cache.transcript_ttl_seconds {
            validation::validate_positive_number("cache.transcript_ttl_seconds", ttl, 1)?;
        }

        if let Some(file_records) = &self.file_records {
            validation::validate_url("file_records.endpoint", &file_records.endpoint)?;
            validation::validate_url(
                "file_records.transcripts_endpoint",
                file_records.transcripts_endpoint(),
            )?;
            validation::validate_positive_number(
                "file_records.timeout_seconds",
                file_records.timeout_seconds(),
                1,
            )?;
        }

        validation::validate_one_of(
            "logging.level",
            &self.logging.level,
            &["error", "warn", "info", "debug", "trace"],
        )?;

        Ok(())
    }
}

impl ConfigProvider for EngineConfig {
    fn key_documents_refresh_hours(&self) -> u64 {
        self.binder
            .key_documents_refresh_hours
            .unwrap_or(DEFAULT_REFRESH_HOURS)
    }

    fn snapshot_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache
                .snapshot_ttl_seconds
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        )
    }

    fn transcript_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache
                .transcript_ttl_seconds
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        )
    }
}

impl Validate for EngineConfig {
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
    fn test_parse_full_config() {
        let toml_content = r#"
[binder]
key_documents_refresh_hours = 12

[cache]
snapshot_ttl_seconds = 60

[file_records]
endpoint = "https://records.example.com/api"
timeout_seconds = 5

[logging]
level = "debug"
json = true
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.key_documents_refresh_hours(), 12);
        assert_eq!(config.snapshot_ttl(), Duration::from_secs(60));
        assert_eq!(config.transcript_ttl(), Duration::from_secs(300));
        let file_records = config.file_records.as_ref().unwrap();
        assert_eq!(file_records.transcripts_endpoint(), "https://records.example.com/api");
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_config() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.key_documents_refresh_hours(), 24);
        assert!(config.file_records.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BINDER_TEST_RECORDS_URL", "https://records.test");

        let toml_content = r#"
[file_records]
endpoint = "${BINDER_TEST_RECORDS_URL}"
"#;

        let config = EngineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.file_records.unwrap().endpoint, "https://records.test");

        std::env::remove_var("BINDER_TEST_RECORDS_URL");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = r#"
[file_records]
endpoint = "invalid-url"
"#;
        assert!(EngineConfig::from_toml_str(invalid_url).unwrap().validate().is_err());

        let zero_refresh = r#"
[binder]
key_documents_refresh_hours = 0
"#;
        assert!(EngineConfig::from_toml_str(zero_refresh).unwrap().validate().is_err());

        let huge_refresh = r#"
[binder]
key_documents_refresh_hours = 3000000000000000
"#;
        assert!(EngineConfig::from_toml_str(huge_refresh).unwrap().validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[binder]\nkey_documents_refresh_hours = 48\n")
            .unwrap();

        let config = EngineConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.key_documents_refresh_hours(), 48);
    }
}
