use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use platebook_recipe::DietaryClassifier;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub dietary: DietaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            admin_email: default_admin_email(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@platebook.app".to_string()
}

fn default_admin_email() -> String {
    "admin@platebook.app".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Search and filtering run in memory over this many recent recipes
    #[serde(default = "default_page_limit")]
    pub page_limit: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
        }
    }
}

fn default_page_limit() -> i64 {
    20
}

/// Keyword lists feeding the derived dietary classification
#[derive(Debug, Deserialize, Clone)]
pub struct DietaryConfig {
    #[serde(default = "default_vegan_keywords")]
    pub vegan_keywords: Vec<String>,
    #[serde(default = "default_vegetarian_keywords")]
    pub vegetarian_keywords: Vec<String>,
    #[serde(default = "default_non_vegetarian_keywords")]
    pub non_vegetarian_keywords: Vec<String>,
}

impl Default for DietaryConfig {
    fn default() -> Self {
        Self {
            vegan_keywords: default_vegan_keywords(),
            vegetarian_keywords: default_vegetarian_keywords(),
            non_vegetarian_keywords: default_non_vegetarian_keywords(),
        }
    }
}

impl DietaryConfig {
    pub fn classifier(&self) -> DietaryClassifier {
        DietaryClassifier::new(
            self.vegan_keywords.clone(),
            self.vegetarian_keywords.clone(),
            self.non_vegetarian_keywords.clone(),
        )
    }
}

fn default_vegan_keywords() -> Vec<String> {
    vec!["vegan".to_string()]
}

fn default_vegetarian_keywords() -> Vec<String> {
    vec!["vegetarian".to_string(), "veggie".to_string()]
}

fn default_non_vegetarian_keywords() -> Vec<String> {
    [
        "chicken", "beef", "pork", "fish", "meat", "seafood", "lamb", "turkey", "bacon", "ham",
        "sausage",
    ]
    .iter()
    .map(|kw| kw.to_string())
    .collect()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PLATEBOOK__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Set defaults
        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:platebook.db")?
            .set_default("database.max_connections", 5)?;

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Override with environment variables (PLATEBOOK__DATABASE__URL, etc.)
        builder = builder.add_source(
            Environment::with_prefix("PLATEBOOK")
                .separator("__")
                .try_parsing(true),
        );

        // Also support legacy environment variables without prefix
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.catalog.page_limit < 1 {
            return Err("Catalog page_limit must be at least 1".to_string());
        }
        Ok(())
    }
}
