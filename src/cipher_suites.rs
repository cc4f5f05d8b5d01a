//! Cipher suite definitions and per-suite negotiation predicates.
//!
//! A cipher suite bundles key exchange, server authentication, bulk
//! encryption and integrity into a single negotiated identifier. The
//! predicates here answer the questions cipher selection asks of each
//! candidate: which versions is it valid for, what curve strength does it
//! require, which signature algorithm must the client accept, and what kind
//! of bulk cipher does it run (block suites are the only ones eligible for
//! encrypt-then-MAC).

use crate::protocol::ProtocolVersion;
use crate::signature::SignatureKind;

/// TLS_FALLBACK_SCSV (RFC 7507).
///
/// A sentinel value in the client's cipher suite list, never a selectable
/// suite. Its presence means the client is retrying at a lower version after
/// a failed higher-version attempt.
pub const FALLBACK_SCSV: u16 = 0x5600;

/// Check whether an offered cipher suite list carries the fallback sentinel.
pub fn contains_fallback_scsv(offered: &[u16]) -> bool {
    offered.contains(&FALLBACK_SCSV)
}

/// Key exchange method of a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyExchange {
    /// Static RSA key transport
    Rsa,

    /// Ephemeral finite-field Diffie-Hellman, RSA-signed
    DheRsa,

    /// Ephemeral elliptic-curve Diffie-Hellman, RSA-signed
    EcdheRsa,

    /// Ephemeral elliptic-curve Diffie-Hellman, ECDSA-signed
    EcdheEcdsa,
}

/// Bulk cipher construction of a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkCipher {
    /// CBC block cipher with HMAC
    Block,

    /// Stream cipher with HMAC
    Stream,

    /// Authenticated encryption with associated data
    Aead,
}

/// TLS cipher suite.
///
/// Covers the server-negotiable spread: static RSA, DHE and ECDHE key
/// exchange; CBC, RC4 and AEAD bulk ciphers. Values are IANA codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CipherSuite {
    /// TLS_RSA_WITH_AES_128_CBC_SHA (0x002F) - RFC 5246
    RsaWithAes128CbcSha = 0x002F,

    /// TLS_DHE_RSA_WITH_AES_128_CBC_SHA (0x0033) - RFC 5246
    DheRsaWithAes128CbcSha = 0x0033,

    /// TLS_RSA_WITH_AES_256_CBC_SHA (0x0035) - RFC 5246
    RsaWithAes256CbcSha = 0x0035,

    /// TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 (0x009E) - RFC 5288
    DheRsaWithAes128GcmSha256 = 0x009E,

    /// TLS_ECDHE_ECDSA_WITH_RC4_128_SHA (0xC007) - RFC 4492
    EcdheEcdsaWithRc4128Sha = 0xC007,

    /// TLS_ECDHE_RSA_WITH_RC4_128_SHA (0xC011) - RFC 4492
    EcdheRsaWithRc4128Sha = 0xC011,

    /// TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA (0xC013) - RFC 4492
    EcdheRsaWithAes128CbcSha = 0xC013,

    /// TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA (0xC014) - RFC 4492
    EcdheRsaWithAes256CbcSha = 0xC014,

    /// TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384 (0xC024) - RFC 5289
    EcdheEcdsaWithAes256CbcSha384 = 0xC024,

    /// TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256 (0xC027) - RFC 5289
    EcdheRsaWithAes128CbcSha256 = 0xC027,

    /// TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384 (0xC028) - RFC 5289
    EcdheRsaWithAes256CbcSha384 = 0xC028,

    /// TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 (0xC02B) - RFC 5289
    EcdheEcdsaWithAes128GcmSha256 = 0xC02B,

    /// TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 (0xC02C) - RFC 5289
    EcdheEcdsaWithAes256GcmSha384 = 0xC02C,

    /// TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 (0xC02F) - RFC 5289
    EcdheRsaWithAes128GcmSha256 = 0xC02F,

    /// TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 (0xC030) - RFC 5289
    EcdheRsaWithAes256GcmSha384 = 0xC030,

    /// TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 (0xCCA8) - RFC 7905
    EcdheRsaWithChacha20Poly1305Sha256 = 0xCCA8,

    /// TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 (0xCCA9) - RFC 7905
    EcdheEcdsaWithChacha20Poly1305Sha256 = 0xCCA9,
}

impl CipherSuite {
    /// Create from wire format (u16 big-endian).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x002F => Some(CipherSuite::RsaWithAes128CbcSha),
            0x0033 => Some(CipherSuite::DheRsaWithAes128CbcSha),
            0x0035 => Some(CipherSuite::RsaWithAes256CbcSha),
            0x009E => Some(CipherSuite::DheRsaWithAes128GcmSha256),
            0xC007 => Some(CipherSuite::EcdheEcdsaWithRc4128Sha),
            0xC011 => Some(CipherSuite::EcdheRsaWithRc4128Sha),
            0xC013 => Some(CipherSuite::EcdheRsaWithAes128CbcSha),
            0xC014 => Some(CipherSuite::EcdheRsaWithAes256CbcSha),
            0xC024 => Some(CipherSuite::EcdheEcdsaWithAes256CbcSha384),
            0xC027 => Some(CipherSuite::EcdheRsaWithAes128CbcSha256),
            0xC028 => Some(CipherSuite::EcdheRsaWithAes256CbcSha384),
            0xC02B => Some(CipherSuite::EcdheEcdsaWithAes128GcmSha256),
            0xC02C => Some(CipherSuite::EcdheEcdsaWithAes256GcmSha384),
            0xC02F => Some(CipherSuite::EcdheRsaWithAes128GcmSha256),
            0xC030 => Some(CipherSuite::EcdheRsaWithAes256GcmSha384),
            0xCCA8 => Some(CipherSuite::EcdheRsaWithChacha20Poly1305Sha256),
            0xCCA9 => Some(CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256),
            _ => None,
        }
    }

    /// Convert to wire format (u16 big-endian).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Get the key exchange method for this cipher suite.
    pub const fn key_exchange(self) -> KeyExchange {
        match self {
            CipherSuite::RsaWithAes128CbcSha | CipherSuite::RsaWithAes256CbcSha => KeyExchange::Rsa,
            CipherSuite::DheRsaWithAes128CbcSha | CipherSuite::DheRsaWithAes128GcmSha256 => {
                KeyExchange::DheRsa
            }
            CipherSuite::EcdheRsaWithRc4128Sha
            | CipherSuite::EcdheRsaWithAes128CbcSha
            | CipherSuite::EcdheRsaWithAes256CbcSha
            | CipherSuite::EcdheRsaWithAes128CbcSha256
            | CipherSuite::EcdheRsaWithAes256CbcSha384
            | CipherSuite::EcdheRsaWithAes128GcmSha256
            | CipherSuite::EcdheRsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithChacha20Poly1305Sha256 => KeyExchange::EcdheRsa,
            CipherSuite::EcdheEcdsaWithRc4128Sha
            | CipherSuite::EcdheEcdsaWithAes256CbcSha384
            | CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => KeyExchange::EcdheEcdsa,
        }
    }

    /// Get the bulk cipher construction for this cipher suite.
    pub const fn bulk_cipher(self) -> BulkCipher {
        match self {
            CipherSuite::RsaWithAes128CbcSha
            | CipherSuite::DheRsaWithAes128CbcSha
            | CipherSuite::RsaWithAes256CbcSha
            | CipherSuite::EcdheRsaWithAes128CbcSha
            | CipherSuite::EcdheRsaWithAes256CbcSha
            | CipherSuite::EcdheEcdsaWithAes256CbcSha384
            | CipherSuite::EcdheRsaWithAes128CbcSha256
            | CipherSuite::EcdheRsaWithAes256CbcSha384 => BulkCipher::Block,
            CipherSuite::EcdheEcdsaWithRc4128Sha | CipherSuite::EcdheRsaWithRc4128Sha => {
                BulkCipher::Stream
            }
            CipherSuite::DheRsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithAes128GcmSha256
            | CipherSuite::EcdheRsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithChacha20Poly1305Sha256
            | CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => BulkCipher::Aead,
        }
    }

    /// Check if this suite runs a CBC block cipher.
    ///
    /// RFC 7366 3: encrypt-then-MAC must never be negotiated for stream or
    /// AEAD suites.
    pub const fn is_block_cipher(self) -> bool {
        matches!(self.bulk_cipher(), BulkCipher::Block)
    }

    /// Check if this suite uses elliptic-curve key exchange.
    pub const fn is_ec(self) -> bool {
        matches!(
            self.key_exchange(),
            KeyExchange::EcdheRsa | KeyExchange::EcdheEcdsa
        )
    }

    /// The signature algorithm the server's key exchange message will carry,
    /// if any.
    ///
    /// Static RSA key transport signs nothing, so it has no requirement
    /// against the client's signature_algorithms list.
    pub const fn signature_kind(self) -> Option<SignatureKind> {
        match self.key_exchange() {
            KeyExchange::Rsa => None,
            KeyExchange::DheRsa | KeyExchange::EcdheRsa => Some(SignatureKind::Rsa),
            KeyExchange::EcdheEcdsa => Some(SignatureKind::Ecdsa),
        }
    }

    /// Minimum curve strength in bits this suite requires, 0 for non-EC
    /// suites.
    ///
    /// Curve strength is paired with the bulk cipher strength: 128-bit bulk
    /// ciphers require a 256-bit curve, 256-bit bulk ciphers a 384-bit curve.
    pub const fn minimum_curve_bits(self) -> u32 {
        match self {
            CipherSuite::RsaWithAes128CbcSha
            | CipherSuite::DheRsaWithAes128CbcSha
            | CipherSuite::RsaWithAes256CbcSha
            | CipherSuite::DheRsaWithAes128GcmSha256 => 0,
            CipherSuite::EcdheEcdsaWithRc4128Sha
            | CipherSuite::EcdheRsaWithRc4128Sha
            | CipherSuite::EcdheRsaWithAes128CbcSha
            | CipherSuite::EcdheRsaWithAes128CbcSha256
            | CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheRsaWithAes128GcmSha256 => 256,
            CipherSuite::EcdheRsaWithAes256CbcSha
            | CipherSuite::EcdheEcdsaWithAes256CbcSha384
            | CipherSuite::EcdheRsaWithAes256CbcSha384
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithChacha20Poly1305Sha256
            | CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => 384,
        }
    }

    /// Check if this suite may be negotiated at the given protocol version.
    ///
    /// Suites bound to the TLS 1.2 PRF (SHA-256/SHA-384 HMAC variants and all
    /// AEAD suites) must not be selected for earlier versions.
    pub const fn is_valid_for_version(self, version: ProtocolVersion) -> bool {
        match self {
            CipherSuite::DheRsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes256CbcSha384
            | CipherSuite::EcdheRsaWithAes128CbcSha256
            | CipherSuite::EcdheRsaWithAes256CbcSha384
            | CipherSuite::EcdheEcdsaWithAes128GcmSha256
            | CipherSuite::EcdheEcdsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithAes128GcmSha256
            | CipherSuite::EcdheRsaWithAes256GcmSha384
            | CipherSuite::EcdheRsaWithChacha20Poly1305Sha256
            | CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => {
                matches!(version, ProtocolVersion::Tls12)
            }
            CipherSuite::RsaWithAes128CbcSha
            | CipherSuite::DheRsaWithAes128CbcSha
            | CipherSuite::RsaWithAes256CbcSha
            | CipherSuite::EcdheEcdsaWithRc4128Sha
            | CipherSuite::EcdheRsaWithRc4128Sha
            | CipherSuite::EcdheRsaWithAes128CbcSha
            | CipherSuite::EcdheRsaWithAes256CbcSha => true,
        }
    }

    /// Get cipher suite name as a string.
    pub const fn name(self) -> &'static str {
        match self {
            CipherSuite::RsaWithAes128CbcSha => "TLS_RSA_WITH_AES_128_CBC_SHA",
            CipherSuite::DheRsaWithAes128CbcSha => "TLS_DHE_RSA_WITH_AES_128_CBC_SHA",
            CipherSuite::RsaWithAes256CbcSha => "TLS_RSA_WITH_AES_256_CBC_SHA",
            CipherSuite::DheRsaWithAes128GcmSha256 => "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",
            CipherSuite::EcdheEcdsaWithRc4128Sha => "TLS_ECDHE_ECDSA_WITH_RC4_128_SHA",
            CipherSuite::EcdheRsaWithRc4128Sha => "TLS_ECDHE_RSA_WITH_RC4_128_SHA",
            CipherSuite::EcdheRsaWithAes128CbcSha => "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
            CipherSuite::EcdheRsaWithAes256CbcSha => "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
            CipherSuite::EcdheEcdsaWithAes256CbcSha384 => {
                "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384"
            }
            CipherSuite::EcdheRsaWithAes128CbcSha256 => "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256",
            CipherSuite::EcdheRsaWithAes256CbcSha384 => "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384",
            CipherSuite::EcdheEcdsaWithAes128GcmSha256 => {
                "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"
            }
            CipherSuite::EcdheEcdsaWithAes256GcmSha384 => {
                "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"
            }
            CipherSuite::EcdheRsaWithAes128GcmSha256 => "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
            CipherSuite::EcdheRsaWithAes256GcmSha384 => "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
            CipherSuite::EcdheRsaWithChacha20Poly1305Sha256 => {
                "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"
            }
            CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256 => {
                "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"
            }
        }
    }
}

/// Get the default server cipher suite preference list.
///
/// Server preference wins over client order during selection. AEAD ECDHE
/// suites lead, CBC suites follow for older clients, static RSA last. RC4
/// suites are never in the defaults; deployments that still need them must
/// opt in through their own capability provider.
pub fn default_cipher_suites() -> Vec<CipherSuite> {
    vec![
        CipherSuite::EcdheEcdsaWithChacha20Poly1305Sha256,
        CipherSuite::EcdheEcdsaWithAes256GcmSha384,
        CipherSuite::EcdheEcdsaWithAes128GcmSha256,
        CipherSuite::EcdheRsaWithChacha20Poly1305Sha256,
        CipherSuite::EcdheRsaWithAes256GcmSha384,
        CipherSuite::EcdheRsaWithAes128GcmSha256,
        CipherSuite::DheRsaWithAes128GcmSha256,
        CipherSuite::EcdheRsaWithAes256CbcSha384,
        CipherSuite::EcdheRsaWithAes128CbcSha256,
        CipherSuite::EcdheRsaWithAes256CbcSha,
        CipherSuite::EcdheRsaWithAes128CbcSha,
        CipherSuite::DheRsaWithAes128CbcSha,
        CipherSuite::RsaWithAes256CbcSha,
        CipherSuite::RsaWithAes128CbcSha,
    ]
}
