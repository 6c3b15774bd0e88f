//! Runtime configuration from environment variables (`.env` is loaded by the binary).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Verification settings for tokens issued by the backend's auth service.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 secret shared with the auth service.
    pub secret: String,
    /// Expected `aud` claim.
    pub audience: String,
}

/// Server configuration.
///
/// | Env Var               | Default           |
/// |-----------------------|-------------------|
/// | `DATABASE_URL`        | required          |
/// | `SUPABASE_JWT_SECRET` | required          |
/// | `JWT_AUDIENCE`        | `authenticated`   |
/// | `HOST`                | `0.0.0.0`         |
/// | `PORT`                | `3000`            |
/// | `DB_MAX_CONNECTIONS`  | `5`               |
/// | `CONTENT_SCHEMA`      | `public`          |
/// | `LOGIN_PATH`          | `/login`          |
/// | `BODY_LIMIT_BYTES`    | `2097152`         |
/// | `CONTENT_MODELS_PATH` | built-in catalog  |
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub content_schema: String,
    pub login_path: String,
    pub body_limit_bytes: usize,
    pub models_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        let or_default = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let database_url = required("DATABASE_URL")?;
        let secret = required("SUPABASE_JWT_SECRET")?;
        let port = parse_var("PORT", or_default("PORT", "3000"))?;
        let max_connections = parse_var("DB_MAX_CONNECTIONS", or_default("DB_MAX_CONNECTIONS", "5"))?;
        let body_limit_bytes = parse_var("BODY_LIMIT_BYTES", or_default("BODY_LIMIT_BYTES", "2097152"))?;

        let content_schema = or_default("CONTENT_SCHEMA", "public");
        if content_schema.is_empty() || !content_schema.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Invalid {
                var: "CONTENT_SCHEMA",
                value: content_schema,
            });
        }
        let login_path = or_default("LOGIN_PATH", "/login");
        if !login_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                var: "LOGIN_PATH",
                value: login_path,
            });
        }

        Ok(AppConfig {
            database_url,
            jwt: JwtConfig {
                secret,
                audience: or_default("JWT_AUDIENCE", "authenticated"),
            },
            host: or_default("HOST", "0.0.0.0"),
            port,
            max_connections,
            content_schema,
            login_path,
            body_limit_bytes,
            models_path: lookup("CONTENT_MODELS_PATH").filter(|p| !p.is_empty()).map(PathBuf::from),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/urbanisme"),
            ("SUPABASE_JWT_SECRET", "secret"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.content_schema, "public");
        assert_eq!(cfg.login_path, "/login");
        assert_eq!(cfg.jwt.audience, "authenticated");
        assert!(cfg.models_path.is_none());
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("SUPABASE_JWT_SECRET", "secret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn bad_port_and_schema_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/urbanisme"),
            ("SUPABASE_JWT_SECRET", "secret"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/urbanisme"),
            ("SUPABASE_JWT_SECRET", "secret"),
            ("CONTENT_SCHEMA", "public; drop"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "CONTENT_SCHEMA", .. }));
    }
}
