use serde::Deserialize;

/// Root application configuration. Loaded from environment variables with
/// the prefix `SUPACHECK__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Base URL of the Supabase management API.
    #[serde(default = "default_supabase_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Path of the append-only audit log file.
    #[serde(default = "default_audit_log_path")]
    pub log_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    3001
}
fn default_supabase_base_url() -> String {
    "https://api.supabase.com/v1".to_string()
}
fn default_audit_log_path() -> String {
    "logs.txt".to_string()
}
fn default_metrics_port() -> u16 {
    9090
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            supabase: SupabaseConfig::default(),
            audit: AuditConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
        }
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            base_url: default_supabase_base_url(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: default_audit_log_path(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("SUPACHECK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
