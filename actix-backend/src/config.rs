use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_access_secret: String,
    pub jwt_refresh_secret: String,
    pub page_size: u32,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::from_filename(".env")
            .or_else(|_| dotenv::dotenv())
            .ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let page_size: u32 = parse("PAGE_SIZE", or_default("PAGE_SIZE", "10"))?;
        if page_size == 0 {
            return Err(ConfigError::Invalid { name: "PAGE_SIZE", value: "0".into() });
        }

        let bcrypt_cost: u32 = parse("BCRYPT_COST", or_default("BCRYPT_COST", "12"))?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid { name: "BCRYPT_COST", value: bcrypt_cost.to_string() });
        }

        Ok(Settings {
            database_url: or_default("DATABASE_URL", "sqlite://db.sqlite3?mode=rwc"),
            host: or_default("HOST", "127.0.0.1"),
            port: parse("PORT", or_default("PORT", "8000"))?,
            jwt_access_secret: required("JWT_ACCESS_SECRET")?,
            jwt_refresh_secret: required("JWT_REFRESH_SECRET")?,
            page_size,
            access_token_ttl: Duration::minutes(parse("ACCESS_TOKEN_MINUTES", or_default("ACCESS_TOKEN_MINUTES", "15"))?),
            refresh_token_ttl: Duration::hours(parse("REFRESH_TOKEN_HOURS", or_default("REFRESH_TOKEN_HOURS", "24"))?),
            bcrypt_cost,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[rstest]
    fn defaults_apply_when_only_secrets_are_set() {
        let settings = Settings::from_lookup(lookup(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "r"),
        ]))
        .unwrap();

        assert_eq!(settings.database_url, "sqlite://db.sqlite3?mode=rwc");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.access_token_ttl, Duration::minutes(15));
        assert_eq!(settings.refresh_token_ttl, Duration::hours(24));
        assert_eq!(settings.bcrypt_cost, 12);
    }

    #[rstest]
    #[case("JWT_ACCESS_SECRET", &[("JWT_REFRESH_SECRET", "r")])]
    #[case("JWT_REFRESH_SECRET", &[("JWT_ACCESS_SECRET", "a")])]
    fn missing_secret_is_reported(#[case] name: &str, #[case] pairs: &[(&str, &str)]) {
        let err = Settings::from_lookup(lookup(pairs)).unwrap_err();
        assert_eq!(err.to_string(), format!("{name} must be set"));
    }

    #[rstest]
    #[case("PORT", "eighty")]
    #[case("PAGE_SIZE", "0")]
    #[case("BCRYPT_COST", "2")]
    fn invalid_values_are_rejected(#[case] name: &str, #[case] value: &str) {
        let err = Settings::from_lookup(lookup(&[
            ("JWT_ACCESS_SECRET", "a"),
            ("JWT_REFRESH_SECRET", "r"),
            (name, value),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
    }
}
