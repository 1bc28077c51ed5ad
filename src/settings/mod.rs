//! Typed view of a descriptor's environment.
//!
//! Mirrors how the managed application reads its environment, including the
//! fallback defaults it applies when a variant leaves a key out.

mod error;

pub use error::SettingsError;

use std::collections::BTreeMap;
use std::str::FromStr;

/// PostgreSQL connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresSettings {
    pub host: String,
    /// Kept verbatim; it is only ever interpolated into the URL.
    pub port: String,
    pub user: String,
    pub password: String,
    pub db: String,
    /// SSL mode appended to the connection URL; empty disables the query.
    pub ssl: String,
}

/// Token signing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtSettings {
    pub secret_key: String,
    pub algorithm: String,
    pub expires_minutes: i64,
}

/// Launch toggles interpreted by `app.sh`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub nginx_setup: bool,
    pub stop_db_on_exit: bool,
    pub install_requirements: bool,
    pub run_migrations: bool,
}

/// Effective application settings for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub toggles: Toggles,
    /// Explicit connection URL; wins over the postgres block when set.
    pub database_url: Option<String>,
    pub postgres: PostgresSettings,
    pub jwt: JwtSettings,
    pub admin_username: String,
    pub admin_password: String,
}

impl Settings {
    /// Build settings from an environment map, applying application defaults.
    pub fn from_env(env: &BTreeMap<String, String>) -> Result<Self, SettingsError> {
        let reader = EnvReader(env);

        Ok(Settings {
            app_host: reader.string("APP_HOST", "127.0.0.1"),
            app_port: reader.number("APP_PORT", 8000)?,
            toggles: Toggles {
                nginx_setup: reader.toggle("NGINX_SETUP")?,
                stop_db_on_exit: reader.toggle("STOP_DB_ON_EXIT")?,
                install_requirements: reader.toggle("INSTALL_REQUIREMENTS")?,
                run_migrations: reader.toggle("RUN_MIGRATIONS")?,
            },
            database_url: env.get("DATABASE_URL").filter(|v| !v.is_empty()).cloned(),
            postgres: PostgresSettings {
                host: reader.string("PG_HOST", "localhost"),
                port: reader.string("PG_PORT", "5432"),
                user: reader.string("PG_USER", "postgres"),
                password: reader.string("PG_PASSWORD", "postgres"),
                db: reader.string("PG_DB", "postgres"),
                ssl: reader.string("PG_SSL", "disable"),
            },
            jwt: JwtSettings {
                secret_key: reader.string("JWT_SECRET_KEY", "change_me"),
                algorithm: reader.string("JWT_ALGORITHM", "HS256"),
                expires_minutes: reader.number("JWT_EXPIRES_MINUTES", 60)?,
            },
            admin_username: reader.string("ADMIN_USERNAME", "admin"),
            admin_password: reader.string("ADMIN_PASSWORD", "admin"),
        })
    }

    /// Connection URL the application connects with.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            return url.clone();
        }

        let pg = &self.postgres;
        let mut url = format!(
            "postgresql+asyncpg://{}:{}@{}:{}/{}",
            pg.user, pg.password, pg.host, pg.port, pg.db
        );
        if !pg.ssl.is_empty() {
            url.push_str("?ssl=");
            url.push_str(&pg.ssl);
        }
        url
    }
}

struct EnvReader<'a>(&'a BTreeMap<String, String>);

impl EnvReader<'_> {
    fn string(&self, key: &str, default: &str) -> String {
        self.0
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn number<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, SettingsError> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidNumber {
                    key,
                    value: value.clone(),
                }),
        }
    }

    fn toggle(&self, key: &'static str) -> Result<bool, SettingsError> {
        match self.0.get(key).map(String::as_str) {
            None | Some("") | Some("0") => Ok(false),
            Some("1") => Ok(true),
            Some(other) => Err(SettingsError::InvalidToggle {
                key,
                value: other.to_string(),
            }),
        }
    }
}
