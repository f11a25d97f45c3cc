#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub default_pct: i64,
    pub accepted_extensions: Vec<String>,
    pub upload_marker: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:5678".to_string(),
            backend_url_production: "https://api.billed.app".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            default_pct: 20,
            accepted_extensions: default_extensions(),
            upload_marker: "/upload".to_string(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            default_pct: option_env!("DEFAULT_PCT")
                .unwrap_or("20").parse().unwrap_or(20),
            accepted_extensions: option_env!("ACCEPTED_EXTENSIONS")
                .map(|list| {
                    list.split(',')
                        .map(|ext| ext.trim().to_lowercase())
                        .filter(|ext| !ext.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.accepted_extensions),
            upload_marker: option_env!("UPLOAD_MARKER")
                .unwrap_or("/upload").to_string(),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
