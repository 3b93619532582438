use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub service_port: u16,
    pub service_host: String,
    pub debug: bool,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
    pub client_api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://accounting.db".to_string());

        let service_port = env::var("PORT")
            .unwrap_or_else(|_| "5002".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let debug = env::var("DEBUG")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "web_frontend/dist".to_string());

        let client_api_url = env::var("CLIENT_API_URL").ok();

        Ok(Config {
            database_url,
            service_port,
            service_host,
            debug,
            allowed_origins,
            static_dir,
            client_api_url,
        })
    }

    /// Origin used when a request carries no host header.
    pub fn fallback_origin(&self) -> String {
        format!("http://{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Debug mode: {}", self.debug);
        tracing::info!("  Allowed origins: {}",
            if self.debug { "any (debug)".to_string() } else { self.allowed_origins.join(", ") });
        tracing::info!("  Static files: {}", self.static_dir);
        tracing::info!("  Client API URL override: {}",
            self.client_api_url.as_deref().filter(|u| !u.is_empty()).unwrap_or("none (same origin)"));
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "t")
}

#[cfg(test)]
pub(crate) fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        service_port: 5002,
        service_host: "127.0.0.1".to_string(),
        debug: true,
        allowed_origins: vec!["*".to_string()],
        static_dir: "web_frontend/dist".to_string(),
        client_api_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env_vars() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("PORT");
            env::remove_var("HOST");
            env::remove_var("DEBUG");
            env::remove_var("ALLOWED_ORIGINS");
            env::remove_var("STATIC_DIR");
            env::remove_var("CLIENT_API_URL");
        }
    }

    #[test]
    fn test_config_with_all_vars() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        unsafe {
            env::set_var("DATABASE_URL", "sqlite://books.db");
            env::set_var("PORT", "8080");
            env::set_var("HOST", "127.0.0.1");
            env::set_var("DEBUG", "False");
            env::set_var("ALLOWED_ORIGINS", "https://a.example, https://b.example");
            env::set_var("STATIC_DIR", "/srv/dist");
            env::set_var("CLIENT_API_URL", "https://api.example");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://books.db");
        assert_eq!(config.service_port, 8080);
        assert_eq!(config.service_host, "127.0.0.1");
        assert!(!config.debug);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.static_dir, "/srv/dist");
        assert_eq!(config.client_api_url, Some("https://api.example".to_string()));
        clear_env_vars();
    }

    #[test]
    fn test_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_vars();

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://accounting.db");
        assert_eq!(config.service_port, 5002);
        assert_eq!(config.service_host, "0.0.0.0");
        assert!(config.debug);
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.static_dir, "web_frontend/dist");
        assert_eq!(config.client_api_url, None);
    }

    #[test]
    fn test_invalid_port() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        unsafe {
            env::set_var("PORT", "not-a-number");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.to_string().contains("PORT"));
        clear_env_vars();
    }

    #[test]
    fn test_port_out_of_range() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env_vars();
        unsafe {
            env::set_var("PORT", "99999");
        }

        let result = Config::from_env();
        assert!(result.is_err());
        clear_env_vars();
    }

    #[test]
    fn test_debug_flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(parse_flag("t"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_fallback_origin() {
        let config = test_config("sqlite::memory:");
        assert_eq!(config.fallback_origin(), "http://127.0.0.1:5002");
    }
}
