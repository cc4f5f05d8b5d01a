//! Server capability and policy provider.
//!
//! Everything deployment-specific the engine consults lives behind this
//! trait: preference lists, the version band, group parameters, and the
//! policy toggles. Default methods supply the documented defaults, so a
//! deployment only overrides what it actually changes.

use crate::cipher_suites::{default_cipher_suites, CipherSuite};
use crate::groups::DhGroup;
use crate::protocol::{CompressionMethod, ProtocolVersion};
use crate::signature::SignatureScheme;
use crate::ticket::NewSessionTicket;

/// Client certificate type codes (RFC 5246 Section 7.4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ClientCertificateType {
    /// rsa_sign (1)
    RsaSign = 1,

    /// dss_sign (2)
    DssSign = 2,

    /// ecdsa_sign (64)
    EcdsaSign = 64,
}

/// Certificate request policy handed to the handshake orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Acceptable client certificate types
    pub certificate_types: Vec<ClientCertificateType>,

    /// Signature schemes acceptable on the client's CertificateVerify
    pub supported_signature_algorithms: Vec<SignatureScheme>,
}

/// Certificate status (OCSP stapling) policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateStatus {
    /// DER-encoded OCSP response to staple
    pub ocsp_response: Vec<u8>,
}

/// What the server supports and allows during negotiation.
///
/// One provider instance may back any number of concurrent handshakes; all
/// methods are read-only queries.
pub trait ServerCapabilities {
    /// Cipher suites in server preference order.
    fn cipher_suites(&self) -> Vec<CipherSuite> {
        default_cipher_suites()
    }

    /// Supported compression methods in server preference order.
    fn compression_methods(&self) -> Vec<CompressionMethod> {
        vec![CompressionMethod::Null]
    }

    /// Earliest protocol version the server will negotiate.
    fn minimum_version(&self) -> ProtocolVersion {
        ProtocolVersion::Tls10
    }

    /// Latest protocol version the server will negotiate.
    fn maximum_version(&self) -> ProtocolVersion {
        ProtocolVersion::Tls12
    }

    /// Signature schemes the server can produce.
    fn signature_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::EcdsaSecp256r1Sha256,
            SignatureScheme::EcdsaSecp384r1Sha384,
            SignatureScheme::EcdsaSecp521r1Sha512,
            SignatureScheme::RsaPkcs1Sha256,
            SignatureScheme::RsaPkcs1Sha384,
            SignatureScheme::RsaPkcs1Sha512,
            SignatureScheme::RsaPkcs1Sha1,
            SignatureScheme::EcdsaSha1,
        ]
    }

    /// Finite-field group for DHE key exchange.
    fn dh_parameters(&self) -> DhGroup {
        DhGroup::Rfc3526_2048
    }

    /// Whether encrypt-then-MAC may be negotiated (RFC 7366).
    fn allow_encrypt_then_mac(&self) -> bool {
        true
    }

    /// Whether truncated HMAC may be negotiated (RFC 6066).
    fn allow_truncated_hmac(&self) -> bool {
        false
    }

    /// Whether a client certificate will be accepted if presented.
    fn accept_client_certificates(&self) -> bool {
        false
    }

    /// Certificate request policy; `None` means no client auth is requested.
    fn certificate_request(&self) -> Option<CertificateRequest> {
        None
    }

    /// Certificate status (OCSP stapling) policy; `None` declines stapling.
    fn certificate_status(&self) -> Option<CertificateStatus> {
        None
    }

    /// Session resumption ticket policy.
    ///
    /// RFC 5077 3.3: a server that advertised the session_ticket extension
    /// but stores no state sends a zero-length ticket. Deployments that
    /// issue real tickets override this and delegate to their session store.
    fn new_session_ticket(&self) -> NewSessionTicket {
        NewSessionTicket::declining()
    }
}

/// Capability provider taking every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultServerCapabilities;

impl ServerCapabilities for DefaultServerCapabilities {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let caps = DefaultServerCapabilities;
        assert_eq!(caps.minimum_version(), ProtocolVersion::Tls10);
        assert_eq!(caps.maximum_version(), ProtocolVersion::Tls12);
        assert_eq!(caps.compression_methods(), vec![CompressionMethod::Null]);
        assert_eq!(caps.dh_parameters(), DhGroup::Rfc3526_2048);
        assert!(caps.allow_encrypt_then_mac());
        assert!(!caps.allow_truncated_hmac());
        assert!(!caps.accept_client_certificates());
        assert!(caps.certificate_request().is_none());
        assert!(caps.certificate_status().is_none());
        assert!(caps.new_session_ticket().is_declining());
    }

    #[test]
    fn test_override_seam() {
        struct Tls12Only;
        impl ServerCapabilities for Tls12Only {
            fn minimum_version(&self) -> ProtocolVersion {
                ProtocolVersion::Tls12
            }
        }

        let caps = Tls12Only;
        assert_eq!(caps.minimum_version(), ProtocolVersion::Tls12);
        // Untouched defaults still apply
        assert_eq!(caps.maximum_version(), ProtocolVersion::Tls12);
        assert!(caps.allow_encrypt_then_mac());
    }
}
