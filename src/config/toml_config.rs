use crate::adapters::gbif::GBIF_BASE_URL;
use crate::adapters::http::{Timeouts, DEFAULT_USER_AGENT};
use crate::adapters::inaturalist::INATURALIST_BASE_URL;
use crate::domain::model::SourceSelection;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub http: HttpConfig,
    pub sources: SourcesConfig,
    pub layers: LayersConfig,
    pub records: RecordsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub lookup_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_secs: 5,
            fetch_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub gbif_base_url: String,
    pub inaturalist_base_url: String,
    pub occurrence_limit: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            gbif_base_url: GBIF_BASE_URL.to_string(),
            inaturalist_base_url: INATURALIST_BASE_URL.to_string(),
            occurrence_limit: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    pub local: bool,
    pub gbif: bool,
    pub inaturalist: bool,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            local: true,
            gbif: false,
            inaturalist: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub species_column: String,
    pub places_column: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            species_column: "Tür".to_string(),
            places_column: "Yerler".to_string(),
        }
    }
}

impl AtlasConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AtlasError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AtlasError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GBIF_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AtlasError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            lookup: Duration::from_secs(self.http.lookup_timeout_secs),
            fetch: Duration::from_secs(self.http.fetch_timeout_secs),
        }
    }

    pub fn default_selection(&self) -> SourceSelection {
        SourceSelection {
            local: self.layers.local,
            gbif: self.layers.gbif,
            inaturalist: self.layers.inaturalist,
        }
    }
}

impl Validate for AtlasConfig {
    fn validate(&self) -> Result<()> {
        // 驗證 API 端點
        validate_url("sources.gbif_base_url", &self.sources.gbif_base_url)?;
        validate_url("sources.inaturalist_base_url", &self.sources.inaturalist_base_url)?;

        validate_positive_number("sources.occurrence_limit", self.sources.occurrence_limit, 1)?;

        // 驗證逾時設定
        validate_range("http.lookup_timeout_secs", self.http.lookup_timeout_secs, 1, 60)?;
        validate_range("http.fetch_timeout_secs", self.http.fetch_timeout_secs, 1, 60)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        validate_non_empty_string("records.species_column", &self.records.species_column)?;
        validate_non_empty_string("records.places_column", &self.records.places_column)?;

        Ok(())
    }
}
