use redis_utils::{
    check_address, validate_address, ConnectivityProbe, ProbeErrorKind, ProbeOutcome,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{FormValidation, RedisServerSettings};
use crate::store::SettingsStore;

pub const CONNECTION_OK_MESSAGE: &str = "Success";
pub const CONNECTION_UNVERIFIED_MESSAGE: &str = "cannot verify connection";

/// Reads, writes and checks the configured Redis server address
pub struct RedisSettingsService {
    store: Arc<dyn SettingsStore>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl RedisSettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { store, probe }
    }

    pub async fn current(&self) -> Result<RedisServerSettings> {
        RedisServerSettings::load(self.store.as_ref()).await
    }

    /// Persist the submitted address exactly as given
    pub async fn update(&self, server_url: String) -> Result<RedisServerSettings> {
        let settings = RedisServerSettings::update(self.store.as_ref(), server_url).await?;
        info!(server_url = %settings.server_url, "Redis server address updated");
        Ok(settings)
    }

    pub fn check_server_url(&self, value: &str) -> FormValidation {
        match check_address(value) {
            Ok(_) => FormValidation::ok(),
            Err(e) => FormValidation::error(e.to_string()),
        }
    }

    pub async fn test_connection(&self, server_url: &str) -> FormValidation {
        let address = match validate_address(server_url) {
            Ok(address) => address,
            Err(e) => {
                return FormValidation::error(e.to_string())
                    .with_error_kind(ProbeErrorKind::InvalidAddress)
            }
        };

        match self.probe.ping(&address).await {
            Ok(ProbeOutcome::Alive) => {
                debug!(address = %address, "Redis connection verified");
                FormValidation::ok_with(CONNECTION_OK_MESSAGE)
            }
            Ok(ProbeOutcome::UnexpectedReply(_)) => {
                FormValidation::warning(CONNECTION_UNVERIFIED_MESSAGE)
            }
            Err(e) => FormValidation::error(e.to_string()).with_error_kind(e.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationKind;
    use crate::store::MemorySettingsStore;
    use async_trait::async_trait;
    use mockall::mock;
    use redis_utils::{ProbeError, RedisAddress};
    use std::time::Duration;

    mock! {
        pub Probe {}

        #[async_trait]
        impl ConnectivityProbe for Probe {
            async fn ping(&self, address: &RedisAddress) -> std::result::Result<ProbeOutcome, ProbeError>;
        }
    }

    fn service_with(probe: MockProbe) -> RedisSettingsService {
        RedisSettingsService::new(Arc::new(MemorySettingsStore::new()), Arc::new(probe))
    }

    fn untouched_probe() -> MockProbe {
        let mut probe = MockProbe::new();
        probe.expect_ping().never();
        probe
    }

    #[test]
    fn test_check_server_url() {
        let service = service_with(untouched_probe());

        assert!(service.check_server_url("example.com:6379").is_ok());
        assert_eq!(
            service.check_server_url(" "),
            FormValidation::error("server_url can not be empty")
        );
        assert_eq!(
            service.check_server_url("example.com"),
            FormValidation::error("address must be of form host:port")
        );
    }

    #[tokio::test]
    async fn test_out_of_range_port_passes_check_but_is_not_probed() {
        let service = service_with(untouched_probe());

        assert_eq!(service.check_server_url("example.com:70000"), FormValidation::ok());
        assert_eq!(service.check_server_url("example.com:00"), FormValidation::ok());

        let result = service.test_connection("example.com:70000").await;
        assert_eq!(result.kind, ValidationKind::Error);
        assert_eq!(
            result.message.as_deref(),
            Some("port must be between 1 and 65535")
        );
        assert_eq!(result.error_kind.as_deref(), Some("invalid_address"));
    }

    #[tokio::test]
    async fn test_connection_success_passes_stripped_address() {
        let mut probe = MockProbe::new();
        probe
            .expect_ping()
            .withf(|address| address.host == "cache.internal" && address.port == 6380)
            .times(1)
            .returning(|_| Ok(ProbeOutcome::Alive));

        let result = service_with(probe)
            .test_connection("https://cache.internal:6380")
            .await;
        assert_eq!(result, FormValidation::ok_with("Success"));
    }

    #[tokio::test]
    async fn test_connection_unexpected_reply_is_warning() {
        let mut probe = MockProbe::new();
        probe
            .expect_ping()
            .returning(|_| Ok(ProbeOutcome::UnexpectedReply("LOADING".to_string())));

        let result = service_with(probe).test_connection("localhost:6379").await;
        assert_eq!(result.kind, ValidationKind::Warning);
        assert_eq!(result.message.as_deref(), Some("cannot verify connection"));
    }

    #[tokio::test]
    async fn test_connection_failure_carries_kind() {
        let mut probe = MockProbe::new();
        probe.expect_ping().returning(|address| {
            Err(ProbeError::Timeout {
                address: address.to_string(),
                timeout: Duration::from_secs(5),
            })
        });

        let result = service_with(probe).test_connection("localhost:6379").await;
        assert_eq!(result.kind, ValidationKind::Error);
        assert_eq!(result.error_kind.as_deref(), Some("timeout"));
        assert!(result.message.unwrap().contains("localhost:6379"));
    }

    #[tokio::test]
    async fn test_connection_rejects_bad_input_without_probing() {
        let service = service_with(untouched_probe());

        let empty = service.test_connection("").await;
        assert_eq!(empty.message.as_deref(), Some("server_url can not be empty"));
        assert_eq!(empty.error_kind.as_deref(), Some("invalid_address"));

        let malformed = service.test_connection("redis://localhost:6379").await;
        assert_eq!(
            malformed.message.as_deref(),
            Some("address must be of form host:port")
        );
    }

    #[tokio::test]
    async fn test_update_then_current() {
        let service = service_with(untouched_probe());
        assert_eq!(service.current().await.unwrap().server_url, "localhost:6379");

        service.update("cache.internal:6380".to_string()).await.unwrap();
        assert_eq!(
            service.current().await.unwrap().server_url,
            "cache.internal:6380"
        );
    }
}
