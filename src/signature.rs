//! Signature scheme codepoints and the usable-list derivation for cipher
//! selection.
//!
//! RFC 5246 7.4.3: the server MUST check candidate cipher suites against the
//! client's signature_algorithms extension before selecting them. The
//! "usable" list is the client's advertised schemes filtered to what the
//! server implements, or the RFC 5246 7.4.1.4.1 defaults when the client
//! offered none.

/// Signature algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// RSA signatures
    Rsa,

    /// DSA signatures
    Dsa,

    /// ECDSA signatures
    Ecdsa,
}

/// TLS 1.2 signature scheme (HashAlgorithm + SignatureAlgorithm pairs,
/// RFC 5246 Section 7.4.1.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SignatureScheme {
    /// rsa_pkcs1_sha1 (0x0201)
    RsaPkcs1Sha1 = 0x0201,

    /// dsa_sha1 (0x0202)
    DsaSha1 = 0x0202,

    /// ecdsa_sha1 (0x0203)
    EcdsaSha1 = 0x0203,

    /// rsa_pkcs1_sha256 (0x0401)
    RsaPkcs1Sha256 = 0x0401,

    /// dsa_sha256 (0x0402)
    DsaSha256 = 0x0402,

    /// ecdsa_secp256r1_sha256 (0x0403)
    EcdsaSecp256r1Sha256 = 0x0403,

    /// rsa_pkcs1_sha384 (0x0501)
    RsaPkcs1Sha384 = 0x0501,

    /// ecdsa_secp384r1_sha384 (0x0503)
    EcdsaSecp384r1Sha384 = 0x0503,

    /// rsa_pkcs1_sha512 (0x0601)
    RsaPkcs1Sha512 = 0x0601,

    /// ecdsa_secp521r1_sha512 (0x0603)
    EcdsaSecp521r1Sha512 = 0x0603,
}

impl SignatureScheme {
    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0201 => Some(SignatureScheme::RsaPkcs1Sha1),
            0x0202 => Some(SignatureScheme::DsaSha1),
            0x0203 => Some(SignatureScheme::EcdsaSha1),
            0x0401 => Some(SignatureScheme::RsaPkcs1Sha256),
            0x0402 => Some(SignatureScheme::DsaSha256),
            0x0403 => Some(SignatureScheme::EcdsaSecp256r1Sha256),
            0x0501 => Some(SignatureScheme::RsaPkcs1Sha384),
            0x0503 => Some(SignatureScheme::EcdsaSecp384r1Sha384),
            0x0601 => Some(SignatureScheme::RsaPkcs1Sha512),
            0x0603 => Some(SignatureScheme::EcdsaSecp521r1Sha512),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Get the signature algorithm family.
    pub const fn kind(self) -> SignatureKind {
        match self {
            SignatureScheme::RsaPkcs1Sha1
            | SignatureScheme::RsaPkcs1Sha256
            | SignatureScheme::RsaPkcs1Sha384
            | SignatureScheme::RsaPkcs1Sha512 => SignatureKind::Rsa,
            SignatureScheme::DsaSha1 | SignatureScheme::DsaSha256 => SignatureKind::Dsa,
            SignatureScheme::EcdsaSha1
            | SignatureScheme::EcdsaSecp256r1Sha256
            | SignatureScheme::EcdsaSecp384r1Sha384
            | SignatureScheme::EcdsaSecp521r1Sha512 => SignatureKind::Ecdsa,
        }
    }
}

/// Default signature schemes assumed when the client did not send a
/// signature_algorithms extension (RFC 5246 Section 7.4.1.4.1).
pub fn default_signature_schemes() -> Vec<SignatureScheme> {
    vec![
        SignatureScheme::RsaPkcs1Sha1,
        SignatureScheme::DsaSha1,
        SignatureScheme::EcdsaSha1,
    ]
}

/// Derive the usable signature scheme list for cipher selection.
///
/// Client order is preserved; schemes the server does not implement are
/// dropped. A client that offered none falls back to the RFC defaults
/// unfiltered.
pub fn usable_signature_schemes(
    client: Option<&[SignatureScheme]>,
    server: &[SignatureScheme],
) -> Vec<SignatureScheme> {
    match client {
        Some(offered) => offered
            .iter()
            .copied()
            .filter(|s| server.contains(s))
            .collect(),
        None => default_signature_schemes(),
    }
}

/// Check whether any usable scheme satisfies the given signature family.
pub fn satisfies_kind(usable: &[SignatureScheme], kind: SignatureKind) -> bool {
    usable.iter().any(|s| s.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_conversion() {
        assert_eq!(
            SignatureScheme::from_u16(0x0403),
            Some(SignatureScheme::EcdsaSecp256r1Sha256)
        );
        assert_eq!(SignatureScheme::from_u16(0x0804), None);
        assert_eq!(SignatureScheme::RsaPkcs1Sha256.to_u16(), 0x0401);
    }

    #[test]
    fn test_scheme_kind() {
        assert_eq!(SignatureScheme::RsaPkcs1Sha1.kind(), SignatureKind::Rsa);
        assert_eq!(SignatureScheme::DsaSha256.kind(), SignatureKind::Dsa);
        assert_eq!(
            SignatureScheme::EcdsaSecp521r1Sha512.kind(),
            SignatureKind::Ecdsa
        );
    }

    #[test]
    fn test_defaults_cover_all_kinds() {
        let defaults = default_signature_schemes();
        assert!(satisfies_kind(&defaults, SignatureKind::Rsa));
        assert!(satisfies_kind(&defaults, SignatureKind::Dsa));
        assert!(satisfies_kind(&defaults, SignatureKind::Ecdsa));
    }

    #[test]
    fn test_usable_intersection_preserves_client_order() {
        let client = [
            SignatureScheme::EcdsaSecp256r1Sha256,
            SignatureScheme::DsaSha1,
            SignatureScheme::RsaPkcs1Sha256,
        ];
        let server = [
            SignatureScheme::RsaPkcs1Sha256,
            SignatureScheme::EcdsaSecp256r1Sha256,
        ];

        let usable = usable_signature_schemes(Some(&client), &server);
        assert_eq!(
            usable,
            vec![
                SignatureScheme::EcdsaSecp256r1Sha256,
                SignatureScheme::RsaPkcs1Sha256,
            ]
        );
        assert!(!satisfies_kind(&usable, SignatureKind::Dsa));
    }

    #[test]
    fn test_usable_defaults_when_absent() {
        let server = [SignatureScheme::RsaPkcs1Sha256];
        let usable = usable_signature_schemes(None, &server);
        assert_eq!(usable, default_signature_schemes());
    }

    #[test]
    fn test_usable_empty_offer_stays_empty() {
        let server = [SignatureScheme::RsaPkcs1Sha256];
        let usable = usable_signature_schemes(Some(&[]), &server);
        assert!(usable.is_empty());
    }
}
