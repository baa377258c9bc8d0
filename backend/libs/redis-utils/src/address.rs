use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::AddressError;

/// Server address used until an administrator saves another one
pub const DEFAULT_SERVER_URL: &str = "localhost:6379";

// Optional http:// or https:// prefix, then host:port. Only the host:port part is captured.
static SERVER_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?([A-Za-z0-9.]+:[0-9]{2,5})$")
        .expect("hardcoded server url regex is invalid - fix source code")
});

/// A syntactically valid Redis server address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisAddress {
    pub host: String,
    pub port: u16,
}

impl RedisAddress {
    pub fn parse(candidate: &str) -> Result<Self, AddressError> {
        validate_address(candidate)
    }
}

impl fmt::Display for RedisAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Check a candidate server address against the `host:port` pattern.
///
/// Blank input is rejected before matching. The candidate itself is matched
/// untrimmed, so surrounding whitespace is a format error. The port is only
/// checked for 2 to 5 digits here; see [`validate_address`] for the range.
pub fn check_address(candidate: &str) -> Result<(), AddressError> {
    match_host_port(candidate).map(|_| ())
}

/// Parse a candidate into a connectable [`RedisAddress`].
///
/// Same checks as [`check_address`], plus the port must fit a TCP port.
pub fn validate_address(candidate: &str) -> Result<RedisAddress, AddressError> {
    let host_port = match_host_port(candidate)?;

    let (host, port) = host_port.rsplit_once(':').ok_or(AddressError::Format)?;
    let port = match port.parse::<u16>() {
        Ok(0) | Err(_) => return Err(AddressError::PortOutOfRange),
        Ok(p) => p,
    };

    Ok(RedisAddress {
        host: host.to_string(),
        port,
    })
}

/// Whether `candidate` would pass [`check_address`]
pub fn is_valid_address(candidate: &str) -> bool {
    check_address(candidate).is_ok()
}

fn match_host_port(candidate: &str) -> Result<&str, AddressError> {
    if candidate.trim().is_empty() {
        return Err(AddressError::Empty);
    }

    let captures = SERVER_URL_REGEX
        .captures(candidate)
        .ok_or(AddressError::Format)?;
    Ok(captures.get(1).ok_or(AddressError::Format)?.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_address("example.com:6379"));
        assert!(is_valid_address("localhost:6379"));
        assert!(is_valid_address("10.0.0.12:16379"));
        assert!(is_valid_address("http://cache.internal:6380"));
        assert!(is_valid_address("https://cache.internal:6380"));
        assert!(is_valid_address(DEFAULT_SERVER_URL));
    }

    #[test]
    fn test_parsed_parts() {
        let address = validate_address("https://redis.example.com:6380").unwrap();
        assert_eq!(address.host, "redis.example.com");
        assert_eq!(address.port, 6380);
        assert_eq!(address.to_string(), "redis.example.com:6380");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(check_address(""), Err(AddressError::Empty));
        assert_eq!(validate_address("   "), Err(AddressError::Empty));
        assert_eq!(validate_address("\t\n"), Err(AddressError::Empty));
    }

    #[test]
    fn test_format_errors() {
        for candidate in [
            "localhost",
            "localhost:",
            "localhost:6",
            "localhost:123456",
            ":6379",
            "redis://localhost:6379",
            "ftp://localhost:6379",
            "hhtp://localhost:6379",
            "http:/localhost:6379",
            "local_host:6379",
            "localhost:6379/0",
            " localhost:6379",
            "localhost:6379 ",
            "user@localhost:6379",
            "[::1]:6379",
        ] {
            assert_eq!(
                check_address(candidate),
                Err(AddressError::Format),
                "{candidate} should be rejected"
            );
        }
    }

    #[test]
    fn test_character_class_prefixes_are_rejected() {
        // Repeated scheme letters are not a scheme.
        assert!(!is_valid_address("ssss://localhost:6379"));
        assert!(!is_valid_address("|://localhost:6379"));
        assert!(!is_valid_address("://localhost:6379"));
    }

    #[test]
    fn test_port_range_is_checked_only_when_parsing() {
        for candidate in ["localhost:70000", "localhost:00"] {
            assert_eq!(check_address(candidate), Ok(()));
            assert!(is_valid_address(candidate));
            assert_eq!(
                validate_address(candidate),
                Err(AddressError::PortOutOfRange)
            );
        }
        assert_eq!(validate_address("localhost:65535").unwrap().port, 65535);
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert_eq!(
            validate_address("localhost:٦٣٧٩"),
            Err(AddressError::Format)
        );
    }
}
