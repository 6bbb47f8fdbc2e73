#[derive(Debug, Clone)]
pub struct AppConfig {
    pub onesignal_app_id: String,
    pub environment: String,
    pub enable_logging: bool,
    pub allow_localhost_as_secure_origin: bool,
    pub notify_button_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            onesignal_app_id: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            allow_localhost_as_secure_origin: true,
            notify_button_enabled: false,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            onesignal_app_id: option_env!("ONESIGNAL_APP_ID")
                .unwrap_or("")
                .trim()
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            allow_localhost_as_secure_origin: option_env!("ALLOW_LOCALHOST_AS_SECURE_ORIGIN")
                .unwrap_or("true").parse().unwrap_or(true),
            notify_button_enabled: option_env!("NOTIFY_BUTTON_ENABLED")
                .unwrap_or("false").parse().unwrap_or(false),
        }
    }

    /// Config con un App ID explícito (tests y montajes manuales)
    pub fn with_app_id(app_id: &str) -> Self {
        Self {
            onesignal_app_id: app_id.trim().to_string(),
            ..Self::default()
        }
    }

    /// Hay App ID de OneSignal configurado
    pub fn is_configured(&self) -> bool {
        !self.onesignal_app_id.is_empty()
    }

    pub fn app_id(&self) -> &str {
        &self.onesignal_app_id
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_configured() {
        let config = AppConfig::default();
        assert!(!config.is_configured());
        assert!(config.allow_localhost_as_secure_origin);
        assert!(!config.notify_button_enabled);
    }

    #[test]
    fn test_blank_app_id_counts_as_missing() {
        assert!(!AppConfig::with_app_id("   ").is_configured());
        assert!(AppConfig::with_app_id("abc-123").is_configured());
        assert_eq!(AppConfig::with_app_id(" abc-123 ").app_id(), "abc-123");
    }
}
