use config::Environment;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Supervity QueryDocument endpoint.
pub const DEFAULT_SUPERVITY_API_URL: &str = "https://docser.supervity.ai/app/QueryDocument";

/// Directory holding the landing page and its assets.
const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub supervity: SupervitySettings,
    pub static_dir: PathBuf,
}

/// Credentials and request defaults for the Supervity API.
///
/// Read from `SUPERVITY_*` environment variables once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SupervitySettings {
    #[serde(default)]
    pub org_id: String,
    #[serde(default = "empty_secret")]
    pub api_token: Secret<String>,
    #[serde(default)]
    pub api_org: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default = "default_usertype")]
    pub usertype: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whole-request timeout for the outbound call. Unset leaves the HTTP
    /// client default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_usertype() -> String {
    "team".to_string()
}

fn default_api_url() -> String {
    DEFAULT_SUPERVITY_API_URL.to_string()
}

impl SupervitySettings {
    /// Deserialize from the given environment source and reject the
    /// settings if any required credential is absent or empty.
    pub fn from_env(environment: Environment) -> Result<Self, AppError> {
        let settings: SupervitySettings = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("SUPERVITY_ORG_ID", self.org_id.as_str()),
            ("SUPERVITY_API_TOKEN", self.api_token.expose_secret().as_str()),
            ("SUPERVITY_API_ORG", self.api_org.as_str()),
            ("SUPERVITY_COLLECTION_NAME", self.collection_name.as_str()),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::ConfigError(anyhow::anyhow!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let supervity = SupervitySettings::from_env(supervity_environment())?;
        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(RelayConfig {
            common,
            supervity,
            static_dir,
        })
    }
}

fn supervity_environment() -> Environment {
    Environment::with_prefix("SUPERVITY").prefix_separator("_")
}
