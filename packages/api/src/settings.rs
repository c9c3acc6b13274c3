use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Database {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Maximum pool size.
    pub connections: u32,
    /// Seconds; applied to pool acquisition and to every store call.
    pub timeout: u64,
}

impl Database {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            user: "notas".into(),
            password: "password".into(),
            host: "localhost".into(),
            port: 5432,
            name: "notas".into(),
            connections: 10,
            timeout: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// `production` enables secure cookies and the FAQ referer check.
    pub environment: String,
}

impl Server {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 4000,
            environment: "development".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Session {
    /// Cookie max-age in hours.
    pub hours: i64,
}

impl Default for Session {
    fn default() -> Self {
        Self { hours: 24 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Mail {
    /// Account name; empty disables delivery.
    pub user: String,
    pub password: String,
    /// HTTP endpoint of the mail relay.
    pub endpoint: String,
    /// Fixed address contact notifications are sent to.
    pub recipient: String,
    /// Seconds.
    pub timeout: u64,
}

impl Mail {
    pub fn is_configured(&self) -> bool {
        !self.user.is_empty() && !self.endpoint.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Mail {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            endpoint: String::new(),
            recipient: "contacto@gestornotas.com".into(),
            timeout: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[allow(unused)]
pub struct Log {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for a daily rolling log file; empty logs to stdout only.
    pub dir: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug".into(),
            dir: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[allow(unused)]
pub struct Settings {
    pub database: Database,
    pub server: Server,
    pub session: Session,
    pub mail: Mail,
    pub log: Log,
}

impl Settings {
    /// Defaults, then `config.toml` if present, then `NOTAS_*` environment variables
    /// (`NOTAS_DATABASE_HOST` sets `database.host`).
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("database.user", defaults.database.user)?
            .set_default("database.password", defaults.database.password)?
            .set_default("database.host", defaults.database.host)?
            .set_default("database.port", i64::from(defaults.database.port))?
            .set_default("database.name", defaults.database.name)?
            .set_default("database.connections", i64::from(defaults.database.connections))?
            .set_default("database.timeout", defaults.database.timeout as i64)?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.environment", defaults.server.environment)?
            .set_default("session.hours", defaults.session.hours)?
            .set_default("mail.user", defaults.mail.user)?
            .set_default("mail.password", defaults.mail.password)?
            .set_default("mail.endpoint", defaults.mail.endpoint)?
            .set_default("mail.recipient", defaults.mail.recipient)?
            .set_default("mail.timeout", defaults.mail.timeout as i64)?
            .set_default("log.level", defaults.log.level)?
            .set_default("log.dir", defaults.log.dir)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("NOTAS").separator("_"))
            .build()?;

        config.try_deserialize()
    }
}
