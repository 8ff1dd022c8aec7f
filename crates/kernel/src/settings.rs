use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKSHOP_ENV";
const CONFIG_DIR_ENV: &str = "BOOKSHOP_CONFIG_DIR";
const ENV_PREFIX: &str = "BOOKSHOP";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to the `config` directory next to the working directory.
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from `config_dir` for the named environment.
    ///
    /// Both `base.toml` and `{environment}.toml` are optional; variables
    /// shaped like `BOOKSHOP__SERVER__PORT` override either file.
    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let parsed_environment: Environment = environment.parse()?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // The environment comes from the selector variable, never from the files.
        settings.environment = parsed_environment;

        settings.catalog.validate()?;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Where the in-memory store gets its catalog from.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseSettings {
    /// JSON seed document; the bundled sample catalog is used when unset.
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storefront knobs shared by the HTTP API and the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "CatalogSettings::default_application_name")]
    pub application_name: String,
    #[serde(default = "CatalogSettings::default_page_size")]
    pub default_page_size: i32,
    #[serde(default = "CatalogSettings::default_featured_count")]
    pub featured_count: i32,
}

impl CatalogSettings {
    fn default_application_name() -> String {
        "BookShop".to_string()
    }

    fn default_page_size() -> i32 {
        12
    }

    fn default_featured_count() -> i32 {
        6
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.default_page_size < 1 {
            return Err(anyhow!(
                "catalog.default_page_size must be at least 1, got {}",
                self.default_page_size
            ));
        }
        if self.featured_count < 1 {
            return Err(anyhow!(
                "catalog.featured_count must be at least 1, got {}",
                self.featured_count
            ));
        }
        Ok(())
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            application_name: Self::default_application_name(),
            default_page_size: Self::default_page_size(),
            featured_count: Self::default_featured_count(),
        }
    }
}
