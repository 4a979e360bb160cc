//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_*` environment variables or a config
//! file, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::RegistrationAge;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("USERS_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// The bind address could not be parsed.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Configuration values for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct AppSettings {
    /// Minimum age in whole years a user must have reached.
    #[ortho_config(default = 0)]
    pub register_age: u32,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Configured registration age.
    pub fn registration_age(&self) -> RegistrationAge {
        RegistrationAge::new(self.register_age)
    }

    /// Configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for unparseable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Pool configuration derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let config = PoolConfig::new(self.database_url()?);
        Ok(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("users-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_REGISTER_AGE", None::<String>),
            ("USERS_DATABASE_URL", None::<String>),
            ("USERS_BIND_ADDR", None::<String>),
            ("USERS_POOL_MAX_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.registration_age(), RegistrationAge::new(0));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_REGISTER_AGE", Some("18".to_owned())),
            (
                "USERS_DATABASE_URL",
                Some("postgres://users@db/users".to_owned()),
            ),
            ("USERS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("USERS_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.registration_age(), RegistrationAge::new(18));
        assert_eq!(settings.database_url(), Ok("postgres://users@db/users"));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    fn invalid_bind_addr_is_reported() {
        let _guard = lock_env([
            ("USERS_REGISTER_AGE", None::<String>),
            ("USERS_DATABASE_URL", None::<String>),
            ("USERS_BIND_ADDR", Some("localhost".to_owned())),
            ("USERS_POOL_MAX_SIZE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
