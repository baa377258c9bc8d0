//! One-shot PING probe against a Redis server

use async_trait::async_trait;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::address::RedisAddress;
use crate::error::ProbeError;

/// Reply expected from a live server, compared case-insensitively
pub const LIVENESS_TOKEN: &str = "PONG";

/// Probe settings
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Upper bound for connect plus PING
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

impl ProbeConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Result of a probe that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Server answered with the liveness token
    Alive,
    /// Server answered, but with something else
    UnexpectedReply(String),
}

impl ProbeOutcome {
    pub fn is_alive(&self) -> bool {
        matches!(self, ProbeOutcome::Alive)
    }
}

/// Whether a PING reply is the liveness token
pub fn is_liveness_reply(reply: &str) -> bool {
    reply.eq_ignore_ascii_case(LIVENESS_TOKEN)
}

/// Connectivity check against a single server address
///
/// Implement this trait to swap the network probe out, e.g. in tests.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Open a connection to `address`, send one liveness probe and report the result.
    async fn ping(&self, address: &RedisAddress) -> Result<ProbeOutcome, ProbeError>;
}

/// [`ConnectivityProbe`] backed by the redis client.
///
/// Every call opens a fresh connection and drops it once the reply is in.
/// Nothing is pooled and nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct RedisPingProbe {
    config: ProbeConfig,
}

impl RedisPingProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn send_ping(&self, address: &RedisAddress) -> Result<String, ProbeError> {
        let label = address.to_string();
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(address.host.clone(), address.port),
            redis: RedisConnectionInfo::default(),
        };

        let client = Client::open(info)
            .map_err(|e| ProbeError::from_redis(&label, self.config.timeout, e))?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ProbeError::from_redis(&label, self.config.timeout, e))?;

        let reply = redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| ProbeError::from_redis(&label, self.config.timeout, e));

        drop(conn);
        reply
    }
}

#[async_trait]
impl ConnectivityProbe for RedisPingProbe {
    async fn ping(&self, address: &RedisAddress) -> Result<ProbeOutcome, ProbeError> {
        debug!(address = %address, "Probing Redis server");

        let result = match timeout(self.config.timeout, self.send_ping(address)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout {
                address: address.to_string(),
                timeout: self.config.timeout,
            }),
        };

        match result {
            Ok(reply) if is_liveness_reply(&reply) => {
                debug!(address = %address, "Redis server answered PING");
                Ok(ProbeOutcome::Alive)
            }
            Ok(reply) => {
                warn!(
                    server = %address.host,
                    reply = %reply,
                    "Redis connection check failed: unexpected PING reply"
                );
                Ok(ProbeOutcome::UnexpectedReply(reply))
            }
            Err(e) => {
                warn!(
                    server = %address.host,
                    kind = e.kind().as_str(),
                    error = %e,
                    "Redis connection check failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_reply_is_case_insensitive() {
        assert!(is_liveness_reply("PONG"));
        assert!(is_liveness_reply("pong"));
        assert!(is_liveness_reply("PoNg"));
        assert!(!is_liveness_reply("PONG "));
        assert!(!is_liveness_reply("OK"));
        assert!(!is_liveness_reply(""));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(RedisPingProbe::default().timeout(), Duration::from_secs(5));
        assert_eq!(
            RedisPingProbe::new(ProbeConfig::with_timeout(Duration::from_millis(250))).timeout(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_outcome_is_alive() {
        assert!(ProbeOutcome::Alive.is_alive());
        assert!(!ProbeOutcome::UnexpectedReply("nope".to_string()).is_alive());
    }
}
