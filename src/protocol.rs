//! Protocol constants and closed enumerations used during negotiation.

/// TLS protocol version.
///
/// Only the versions the negotiation band can cover are enumerated. The
/// derived ordering matches the wire ordering, so version comparisons are
/// plain `<`/`>=` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ProtocolVersion {
    /// TLS 1.0 (RFC 2246) - Legacy, not recommended
    Tls10 = 0x0301,

    /// TLS 1.1 (RFC 4346) - Legacy, not recommended
    Tls11 = 0x0302,

    /// TLS 1.2 (RFC 5246)
    Tls12 = 0x0303,
}

impl ProtocolVersion {
    /// Create from wire format (u16 big-endian).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0301 => Some(ProtocolVersion::Tls10),
            0x0302 => Some(ProtocolVersion::Tls11),
            0x0303 => Some(ProtocolVersion::Tls12),
            _ => None,
        }
    }

    /// Convert to wire format (u16 big-endian).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Get the protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            ProtocolVersion::Tls10 => "TLS 1.0",
            ProtocolVersion::Tls11 => "TLS 1.1",
            ProtocolVersion::Tls12 => "TLS 1.2",
        }
    }

    /// Check whether the signature_algorithms extension is meaningful at this
    /// version.
    ///
    /// RFC 5246 7.4.1.4.1: clients MUST NOT offer it for prior versions.
    pub const fn supports_signature_algorithms(self) -> bool {
        matches!(self, ProtocolVersion::Tls12)
    }
}

/// TLS compression method (RFC 5246 Section 7.4.1.2, RFC 3749).
///
/// In practice only `Null` is ever configured; `Deflate` exists so richer
/// server lists remain expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionMethod {
    /// No compression (0)
    Null = 0,

    /// DEFLATE compression (1) - RFC 3749
    Deflate = 1,
}

impl CompressionMethod {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CompressionMethod::Null),
            1 => Some(CompressionMethod::Deflate),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Client hello extension types this engine understands (IANA registry).
///
/// The engine never generates an extension type outside this set, and never
/// echoes one the client did not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExtensionType {
    /// max_fragment_length (1) - RFC 6066
    MaxFragmentLength = 1,

    /// truncated_hmac (4) - RFC 6066
    TruncatedHmac = 4,

    /// status_request (5) - OCSP stapling, RFC 6066
    StatusRequest = 5,

    /// supported_groups (10) - formerly elliptic_curves, RFC 4492/RFC 7919
    SupportedGroups = 10,

    /// ec_point_formats (11) - RFC 4492
    EcPointFormats = 11,

    /// signature_algorithms (13) - RFC 5246
    SignatureAlgorithms = 13,

    /// encrypt_then_mac (22) - RFC 7366
    EncryptThenMac = 22,

    /// session_ticket (35) - RFC 5077
    SessionTicket = 35,
}

impl ExtensionType {
    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(ExtensionType::MaxFragmentLength),
            4 => Some(ExtensionType::TruncatedHmac),
            5 => Some(ExtensionType::StatusRequest),
            10 => Some(ExtensionType::SupportedGroups),
            11 => Some(ExtensionType::EcPointFormats),
            13 => Some(ExtensionType::SignatureAlgorithms),
            22 => Some(ExtensionType::EncryptThenMac),
            35 => Some(ExtensionType::SessionTicket),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

/// EC point format (RFC 4492 Section 5.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EcPointFormat {
    /// uncompressed (0)
    Uncompressed = 0,

    /// ansiX962_compressed_prime (1)
    AnsiX962CompressedPrime = 1,

    /// ansiX962_compressed_char2 (2)
    AnsiX962CompressedChar2 = 2,
}

impl EcPointFormat {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(EcPointFormat::Uncompressed),
            1 => Some(EcPointFormat::AnsiX962CompressedPrime),
            2 => Some(EcPointFormat::AnsiX962CompressedChar2),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Max fragment length codes (RFC 6066 Section 4).
///
/// The four codes below are the entire legal set; anything else in the
/// extension is an illegal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaxFragmentLength {
    /// 2^9 = 512 bytes (1)
    Pow9 = 1,

    /// 2^10 = 1024 bytes (2)
    Pow10 = 2,

    /// 2^11 = 2048 bytes (3)
    Pow11 = 3,

    /// 2^12 = 4096 bytes (4)
    Pow12 = 4,
}

impl MaxFragmentLength {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(MaxFragmentLength::Pow9),
            2 => Some(MaxFragmentLength::Pow10),
            3 => Some(MaxFragmentLength::Pow11),
            4 => Some(MaxFragmentLength::Pow12),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// The negotiated fragment length in bytes.
    pub const fn fragment_length(self) -> usize {
        1 << (8 + self as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_version() {
        assert_eq!(
            ProtocolVersion::from_u16(0x0303),
            Some(ProtocolVersion::Tls12)
        );
        assert_eq!(ProtocolVersion::from_u16(0x0304), None);
        assert_eq!(ProtocolVersion::Tls12.to_u16(), 0x0303);
        assert_eq!(ProtocolVersion::Tls10.name(), "TLS 1.0");
        assert!(ProtocolVersion::Tls10 < ProtocolVersion::Tls12);
        assert!(ProtocolVersion::Tls12.supports_signature_algorithms());
        assert!(!ProtocolVersion::Tls11.supports_signature_algorithms());
    }

    #[test]
    fn test_compression_method() {
        assert_eq!(CompressionMethod::from_u8(0), Some(CompressionMethod::Null));
        assert_eq!(CompressionMethod::from_u8(255), None);
        assert_eq!(CompressionMethod::Deflate.to_u8(), 1);
    }

    #[test]
    fn test_extension_type() {
        assert_eq!(
            ExtensionType::from_u16(22),
            Some(ExtensionType::EncryptThenMac)
        );
        assert_eq!(ExtensionType::from_u16(51), None);
        assert_eq!(ExtensionType::SupportedGroups.to_u16(), 10);
    }

    #[test]
    fn test_max_fragment_length() {
        assert_eq!(MaxFragmentLength::from_u8(1), Some(MaxFragmentLength::Pow9));
        assert_eq!(MaxFragmentLength::from_u8(0), None);
        assert_eq!(MaxFragmentLength::from_u8(5), None);
        assert_eq!(MaxFragmentLength::Pow9.fragment_length(), 512);
        assert_eq!(MaxFragmentLength::Pow12.fragment_length(), 4096);
    }

    #[test]
    fn test_ec_point_format() {
        assert_eq!(EcPointFormat::from_u8(0), Some(EcPointFormat::Uncompressed));
        assert_eq!(
            EcPointFormat::from_u8(1),
            Some(EcPointFormat::AnsiX962CompressedPrime)
        );
        assert_eq!(EcPointFormat::from_u8(3), None);
    }
}
