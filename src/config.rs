//! Environment-driven configuration. `main` loads `.env` first via `dotenvy`.

use {
    crate::{domain::trade::PollPolicy, services::reconciler::worst_case_duration},
    std::{env, net::SocketAddr, str::FromStr, time::Duration},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key}: invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub appid: String,
    pub mch_id: String,
    pub api_key: String,
    /// Per-call timeout for Submit, Query and Reverse.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub poll_policy: PollPolicy,
    pub listen_addr: SocketAddr,
    pub http_request_timeout: Duration,
}

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.mch.weixin.qq.com";

/// Added on top of the worst-case reconciliation time when
/// `HTTP_REQUEST_TIMEOUT_SECS` is unset.
pub const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults
    /// where one exists.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let gateway = GatewayConfig {
            base_url: lookup("GATEWAY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_BASE_URL.to_string()),
            appid: required("WECHAT_APPID")?,
            mch_id: required("WECHAT_MCH_ID")?,
            api_key: required("WECHAT_API_KEY")?,
            timeout: Duration::from_secs(parse_or(&lookup, "GATEWAY_TIMEOUT_SECS", 10)?),
        };

        let max_query_attempts = parse_or(
            &lookup,
            "MAX_QUERY_ATTEMPTS",
            PollPolicy::DEFAULT_MAX_QUERY_ATTEMPTS,
        )?;
        let query_interval = Duration::from_secs(parse_or(
            &lookup,
            "QUERY_INTERVAL_SECS",
            PollPolicy::DEFAULT_QUERY_INTERVAL.as_secs(),
        )?);
        let poll_policy =
            PollPolicy::new(max_query_attempts, query_interval).map_err(|_| {
                ConfigError::Invalid {
                    key: "MAX_QUERY_ATTEMPTS",
                    value: max_query_attempts.to_string(),
                }
            })?;

        // The request timeout must outlast any reconciliation it can start.
        let worst_case = worst_case_duration(poll_policy, gateway.timeout);
        let http_request_timeout = match lookup("HTTP_REQUEST_TIMEOUT_SECS") {
            None => worst_case.saturating_add(REQUEST_TIMEOUT_SLACK),
            Some(value) => match value.trim().parse() {
                Ok(secs) if Duration::from_secs(secs) >= worst_case => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_REQUEST_TIMEOUT_SECS",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            gateway,
            poll_policy,
            listen_addr: parse_or(
                &lookup,
                "LISTEN_ADDR",
                SocketAddr::from(([0, 0, 0, 0], 3000)),
            )?,
            http_request_timeout,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
