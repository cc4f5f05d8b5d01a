//! Error types for the negotiation engine.
//!
//! Every negotiation failure carries a specific kind, and the kind is part of
//! the wire contract: the orchestrator translates it into the protocol-level
//! alert description sent to the peer before closing the connection.

use core::fmt;

/// Result type for negotiation operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can terminate a handshake during parameter negotiation.
///
/// All failures are synchronous, non-retryable, and fatal to the handshake.
/// `InternalError` indicates a bug in the server (or a driver calling the
/// engine out of order) rather than a protocol violation by the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Client's protocol version is below the configured minimum
    ProtocolVersion(String),

    /// Fallback retry from a client that supports a later version (RFC 7507)
    InappropriateFallback,

    /// No mutually acceptable cipher suite or compression method
    HandshakeFailure(String),

    /// Malformed or forbidden value in a client extension
    IllegalParameter(String),

    /// Data received that was never solicited
    UnexpectedMessage(String),

    /// Internal consistency failure
    InternalError(String),
}

impl Error {
    /// The alert description mandated for this failure kind.
    pub const fn alert(&self) -> AlertDescription {
        match self {
            Error::ProtocolVersion(_) => AlertDescription::ProtocolVersion,
            Error::InappropriateFallback => AlertDescription::InappropriateFallback,
            Error::HandshakeFailure(_) => AlertDescription::HandshakeFailure,
            Error::IllegalParameter(_) => AlertDescription::IllegalParameter,
            Error::UnexpectedMessage(_) => AlertDescription::UnexpectedMessage,
            Error::InternalError(_) => AlertDescription::InternalError,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ProtocolVersion(msg) => write!(f, "Protocol version error: {}", msg),
            Error::InappropriateFallback => write!(f, "Inappropriate fallback"),
            Error::HandshakeFailure(msg) => write!(f, "Handshake failure: {}", msg),
            Error::IllegalParameter(msg) => write!(f, "Illegal parameter: {}", msg),
            Error::UnexpectedMessage(msg) => write!(f, "Unexpected message: {}", msg),
            Error::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// TLS alert descriptions produced by negotiation failures (RFC 5246 Section 7.2).
///
/// Only the descriptions this engine can emit are enumerated; the record and
/// alert layers own the full registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    /// Unexpected message (10)
    UnexpectedMessage = 10,

    /// Handshake failure (40)
    HandshakeFailure = 40,

    /// Illegal parameter (47)
    IllegalParameter = 47,

    /// Protocol version (70)
    ProtocolVersion = 70,

    /// Internal error (80)
    InternalError = 80,

    /// Inappropriate fallback (86) - RFC 7507
    InappropriateFallback = 86,
}

impl AlertDescription {
    /// Convert from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            10 => Some(AlertDescription::UnexpectedMessage),
            40 => Some(AlertDescription::HandshakeFailure),
            47 => Some(AlertDescription::IllegalParameter),
            70 => Some(AlertDescription::ProtocolVersion),
            80 => Some(AlertDescription::InternalError),
            86 => Some(AlertDescription::InappropriateFallback),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_mapping() {
        assert_eq!(
            Error::ProtocolVersion("too old".into()).alert(),
            AlertDescription::ProtocolVersion
        );
        assert_eq!(
            Error::InappropriateFallback.alert(),
            AlertDescription::InappropriateFallback
        );
        assert_eq!(
            Error::HandshakeFailure("no suite".into()).alert(),
            AlertDescription::HandshakeFailure
        );
        assert_eq!(
            Error::IllegalParameter("bad length".into()).alert(),
            AlertDescription::IllegalParameter
        );
        assert_eq!(
            Error::UnexpectedMessage("supplemental data".into()).alert(),
            AlertDescription::UnexpectedMessage
        );
        assert_eq!(
            Error::InternalError("state".into()).alert(),
            AlertDescription::InternalError
        );
    }

    #[test]
    fn test_alert_description_conversion() {
        assert_eq!(
            AlertDescription::from_u8(86),
            Some(AlertDescription::InappropriateFallback)
        );
        assert_eq!(AlertDescription::from_u8(0), None);
        assert_eq!(AlertDescription::HandshakeFailure.to_u8(), 40);
    }
}
