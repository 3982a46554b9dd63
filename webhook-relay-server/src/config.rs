use crate::error::ConfigError;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;
use webhook_relay_core::DEFAULT_ROUTING_KEY;
use webhook_relay_rabbitmq::AmqpOptions;

pub const RABBITMQ_LOGIN: &str = "RABBITMQ_ERP_LOGIN";
pub const RABBITMQ_PASS: &str = "RABBITMQ_ERP_PASS";
pub const RABBITMQ_HOST: &str = "RABBITMQ_ERP_HOST";
pub const RABBITMQ_PORT: &str = "RABBITMQ_ERP_PORT";
pub const RABBITMQ_VHOST: &str = "RABBITMQ_ERP_VHOST";
pub const LISTEN_PORT: &str = "LISTEN_PORT";
pub const LISTEN_HOST: &str = "LISTEN_HOST";
pub const RELAY_QUEUE: &str = "RELAY_QUEUE";
pub const REDIRECT_PAGE: &str = "REDIRECT_PAGE";
pub const PUBLISHER_CONFIRMS: &str = "AMQP_PUBLISHER_CONFIRMS";

const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
const DEFAULT_REDIRECT_PAGE: &str = "./static/redirect.html";

/// Relay configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Broker connection settings (all required)
    pub amqp: AmqpOptions,

    /// Interface to bind (default: 0.0.0.0)
    pub listen_host: String,

    /// HTTP port (required)
    pub listen_port: u16,

    /// Routing key on the default exchange (default: viber_incoming)
    pub routing_key: String,

    /// Page served at /redirect (default: ./static/redirect.html)
    pub redirect_page: PathBuf,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // Variables already set in the environment take precedence over .env
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse(RABBITMQ_PORT, required(&lookup, RABBITMQ_PORT)?)?;
        if port == 0 {
            return Err(ConfigError::Invalid {
                key: RABBITMQ_PORT,
                value: port.to_string(),
                reason: "port must be greater than 0".into(),
            });
        }

        let amqp = AmqpOptions {
            login: required(&lookup, RABBITMQ_LOGIN)?,
            password: required(&lookup, RABBITMQ_PASS)?,
            host: required(&lookup, RABBITMQ_HOST)?,
            port,
            vhost: required(&lookup, RABBITMQ_VHOST)?,
            confirms: match optional(&lookup, PUBLISHER_CONFIRMS) {
                Some(raw) => parse_bool(PUBLISHER_CONFIRMS, raw)?,
                None => false,
            },
        };

        let config = Self {
            amqp,
            listen_host: optional(&lookup, LISTEN_HOST)
                .unwrap_or_else(|| DEFAULT_LISTEN_HOST.to_string()),
            listen_port: parse(LISTEN_PORT, required(&lookup, LISTEN_PORT)?)?,
            routing_key: optional(&lookup, RELAY_QUEUE)
                .unwrap_or_else(|| DEFAULT_ROUTING_KEY.to_string()),
            redirect_page: optional(&lookup, REDIRECT_PAGE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REDIRECT_PAGE)),
        };

        // Catch a bad LISTEN_HOST here, before the broker connection is opened
        config.listen_addr()?;

        Ok(config)
    }

    pub fn amqp_options(&self) -> AmqpOptions {
        self.amqp.clone()
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.listen_host, self.listen_port);
        SocketAddr::from_str(&raw).map_err(|e| ConfigError::Invalid {
            key: LISTEN_HOST,
            value: self.listen_host.clone(),
            reason: e.to_string(),
        })
    }

    /// Log the effective configuration (password redacted)
    pub fn log_summary(&self) {
        info!(
            broker = %self.amqp.redacted_uri(),
            confirms = self.amqp.confirms,
            listen = %format!("{}:{}", self.listen_host, self.listen_port),
            routing_key = %self.routing_key,
            redirect_page = %self.redirect_page.display(),
            "Configuration loaded"
        );
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing { key })
}

/// Blank values count as unset
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a boolean".into(),
        }),
    }
}
