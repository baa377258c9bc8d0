//! # Redis Utilities
//!
//! Address validation and connectivity probing for a single configured
//! Redis server.
//!
//! ## Features
//!
//! - `host:port` syntax validation, optionally prefixed with `http://` or `https://`
//! - One-shot `PING` probe with a bounded timeout
//! - Explicit probe error kinds (invalid address, refused, timeout, unexpected)
//!
//! ## Example
//!
//! ```ignore
//! use redis_utils::{validate_address, ConnectivityProbe, ProbeConfig, RedisPingProbe};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let address = validate_address("localhost:6379")?;
//! let probe = RedisPingProbe::new(ProbeConfig::default());
//!
//! if probe.ping(&address).await?.is_alive() {
//!     println!("{} is up", address);
//! }
//! # Ok(())
//! # }
//! ```

mod address;
mod error;
mod probe;

pub use address::{
    check_address, is_valid_address, validate_address, RedisAddress, DEFAULT_SERVER_URL,
};
pub use error::{AddressError, ProbeError, ProbeErrorKind};
pub use probe::{
    is_liveness_reply, ConnectivityProbe, ProbeConfig, ProbeOutcome, RedisPingProbe,
    LIVENESS_TOKEN,
};
