/*
 * Responsibility
 * - Load settings from the environment (DATABASE_URL, TOKEN_SECRET, CORS, ...)
 * - Validate them once at startup (missing/invalid => startup fails)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 86_400; // 24h
// `exp = iat + ttl` must stay representable as i64 seconds
const MAX_TOKEN_TTL_SECONDS: u64 = 10 * 365 * 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // HS256 signing secret shared by token issuance and verification
    pub token_secret: String,
    pub token_ttl_seconds: u64,
    pub token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the secret or the database credentials
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let mut cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if cors_allowed_origins.is_empty() {
            let frontend = lookup("DEPLOYED_FRONTEND_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string());
            cors_allowed_origins.push(frontend);
        }

        let token_secret = lookup("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?;
        if token_secret.is_empty() {
            return Err(ConfigError::Invalid("TOKEN_SECRET"));
        }

        let token_ttl_seconds = match lookup("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| (1..=MAX_TOKEN_TTL_SECONDS).contains(n))
                .ok_or(ConfigError::Invalid("TOKEN_TTL_SECONDS"))?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        let token_leeway_seconds = lookup("TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            token_secret,
            token_ttl_seconds,
            token_leeway_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.token_ttl_seconds, 86_400);
        assert_eq!(config.token_leeway_seconds, 0);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/trips",
        )]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TOKEN_SECRET"));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", ""),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("TOKEN_SECRET"));
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("TOKEN_SECRET", "s3cret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", "s3cret"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn out_of_range_token_ttl_is_rejected() {
        for raw in ["0", "-5", "18446744073709551615", "9223372036854775807", "soon"] {
            let err = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/trips"),
                ("TOKEN_SECRET", "s3cret"),
                ("TOKEN_TTL_SECONDS", raw),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::Invalid("TOKEN_TTL_SECONDS"), "ttl {raw}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", "s3cret"),
            ("TOKEN_TTL_SECONDS", " 900 "),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_seconds, 900);
    }

    #[test]
    fn cors_origins_prefer_explicit_list_over_frontend_url() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", "s3cret"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example ,"),
            ("DEPLOYED_FRONTEND_URL", "https://ignored.example"),
            ("APP_ENV", "PROD"),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.app_env.is_production());

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("TOKEN_SECRET", "s3cret"),
            ("DEPLOYED_FRONTEND_URL", "https://trips.example"),
        ]))
        .unwrap();
        assert_eq!(config.cors_allowed_origins, vec!["https://trips.example"]);
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/trips"),
            ("TOKEN_SECRET", "super-secret-value"),
        ]))
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(!printed.contains("user:pw"));
    }
}
