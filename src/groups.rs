//! Group and curve selection.
//!
//! Two strength computations drive negotiation and must agree: the maximum
//! negotiable curve strength (consulted while filtering cipher suite
//! candidates) and concrete curve selection (run after a suite is chosen).
//! Both are derived from the same per-group `curve_bits` table, so a suite
//! that passed the strength check always has a selectable curve.

use crate::protocol::EcPointFormat;

/// Named elliptic curve group (RFC 4492 / RFC 8422 codepoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NamedGroup {
    /// secp256r1 (23)
    Secp256r1 = 23,

    /// secp384r1 (24)
    Secp384r1 = 24,

    /// secp521r1 (25)
    Secp521r1 = 25,

    /// x25519 (29) - RFC 8422
    X25519 = 29,
}

impl NamedGroup {
    /// The richest curve strength this implementation supports.
    ///
    /// RFC 4492 4: a client that proposes ECC cipher suites may omit the
    /// curves extension, in which case the server is free to choose any
    /// curve, so the negotiable maximum is our own maximum.
    pub const MAX_CURVE_BITS: u32 = 521;

    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            23 => Some(NamedGroup::Secp256r1),
            24 => Some(NamedGroup::Secp384r1),
            25 => Some(NamedGroup::Secp521r1),
            29 => Some(NamedGroup::X25519),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Approximate curve strength in bits.
    pub const fn curve_bits(self) -> u32 {
        match self {
            NamedGroup::Secp256r1 => 256,
            NamedGroup::Secp384r1 => 384,
            NamedGroup::Secp521r1 => 521,
            NamedGroup::X25519 => 253,
        }
    }

    /// Whether the curve has cofactor 1.
    ///
    /// Required for the curves eligible as server defaults under FIPS ECDH.
    pub const fn cofactor_one(self) -> bool {
        matches!(
            self,
            NamedGroup::Secp256r1 | NamedGroup::Secp384r1 | NamedGroup::Secp521r1
        )
    }

    /// Whether this is a prime-field Weierstrass curve with an ANSI X9.62
    /// compressed point encoding.
    pub const fn has_compressed_prime_encoding(self) -> bool {
        matches!(
            self,
            NamedGroup::Secp256r1 | NamedGroup::Secp384r1 | NamedGroup::Secp521r1
        )
    }
}

/// Finite-field Diffie-Hellman group (RFC 3526 MODP groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DhGroup {
    /// 2048-bit MODP group (RFC 3526 Section 3)
    Rfc3526_2048,

    /// 3072-bit MODP group (RFC 3526 Section 4)
    Rfc3526_3072,

    /// 4096-bit MODP group (RFC 3526 Section 5)
    Rfc3526_4096,
}

impl DhGroup {
    /// Modulus size in bits.
    pub const fn modulus_bits(self) -> u32 {
        match self {
            DhGroup::Rfc3526_2048 => 2048,
            DhGroup::Rfc3526_3072 => 3072,
            DhGroup::Rfc3526_4096 => 4096,
        }
    }
}

/// Elliptic-curve key exchange configuration chosen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcConfig {
    /// Selected named curve
    pub group: NamedGroup,

    /// Whether compressed point encoding is preferred on the wire
    pub point_compression: bool,
}

/// Finite-field key exchange configuration chosen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhConfig {
    /// Selected MODP group
    pub group: DhGroup,
}

/// Key exchange configuration for the selected cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyExchangeConfig {
    /// Ephemeral elliptic-curve Diffie-Hellman
    Ecdhe(EcConfig),

    /// Ephemeral finite-field Diffie-Hellman
    Dhe(DhConfig),

    /// Key exchange needs no group parameters (static RSA key transport)
    None,
}

/// Maximum curve strength negotiable given the client's advertised groups.
///
/// An absent extension means the client declined to restrict the server's
/// choice; an empty or all-unknown list restricts it to nothing.
pub fn max_negotiable_curve_bits(client_groups: Option<&[NamedGroup]>) -> u32 {
    match client_groups {
        None => NamedGroup::MAX_CURVE_BITS,
        Some(groups) => groups.iter().map(|g| g.curve_bits()).max().unwrap_or(0),
    }
}

/// Select a concrete curve of at least `minimum_curve_bits` strength.
///
/// With an advertised list the scan honors client order and returns the
/// first strong-enough curve. Without one, a cofactor-1 default is picked by
/// strength tier.
pub fn select_curve(
    client_groups: Option<&[NamedGroup]>,
    minimum_curve_bits: u32,
) -> Option<NamedGroup> {
    match client_groups {
        None => select_default_curve(minimum_curve_bits),
        Some(groups) => groups
            .iter()
            .copied()
            .find(|g| g.curve_bits() >= minimum_curve_bits),
    }
}

/// Default curve by strength tier, restricted to cofactor-1 curves.
pub fn select_default_curve(minimum_curve_bits: u32) -> Option<NamedGroup> {
    if minimum_curve_bits <= 256 {
        Some(NamedGroup::Secp256r1)
    } else if minimum_curve_bits <= 384 {
        Some(NamedGroup::Secp384r1)
    } else if minimum_curve_bits <= 521 {
        Some(NamedGroup::Secp521r1)
    } else {
        None
    }
}

/// Whether compressed point encoding should be preferred for `group`.
///
/// Compression is only preferred when the client's point-format list says it
/// can parse the compressed encoding the curve uses.
pub fn is_compression_preferred(
    client_formats: Option<&[EcPointFormat]>,
    group: NamedGroup,
) -> bool {
    let Some(formats) = client_formats else {
        return false;
    };
    group.has_compressed_prime_encoding()
        && formats.contains(&EcPointFormat::AnsiX962CompressedPrime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_group_conversion() {
        assert_eq!(NamedGroup::from_u16(23), Some(NamedGroup::Secp256r1));
        assert_eq!(NamedGroup::from_u16(256), None);
        assert_eq!(NamedGroup::Secp521r1.to_u16(), 25);
    }

    #[test]
    fn test_curve_bits() {
        assert_eq!(NamedGroup::Secp256r1.curve_bits(), 256);
        assert_eq!(NamedGroup::Secp384r1.curve_bits(), 384);
        assert_eq!(NamedGroup::Secp521r1.curve_bits(), 521);
        assert_eq!(NamedGroup::X25519.curve_bits(), 253);
    }

    #[test]
    fn test_max_negotiable_no_restriction() {
        assert_eq!(
            max_negotiable_curve_bits(None),
            NamedGroup::MAX_CURVE_BITS
        );
    }

    #[test]
    fn test_max_negotiable_from_list() {
        let groups = [NamedGroup::X25519, NamedGroup::Secp384r1];
        assert_eq!(max_negotiable_curve_bits(Some(&groups)), 384);
        assert_eq!(max_negotiable_curve_bits(Some(&[])), 0);
    }

    #[test]
    fn test_select_curve_client_order() {
        // First strong-enough curve in client order wins, not the strongest
        let groups = [
            NamedGroup::X25519,
            NamedGroup::Secp521r1,
            NamedGroup::Secp256r1,
        ];
        assert_eq!(
            select_curve(Some(&groups), 256),
            Some(NamedGroup::Secp521r1)
        );
        assert_eq!(select_curve(Some(&groups), 100), Some(NamedGroup::X25519));
        assert_eq!(select_curve(Some(&[NamedGroup::Secp256r1]), 384), None);
    }

    #[test]
    fn test_default_curve_tiers() {
        assert_eq!(select_default_curve(256), Some(NamedGroup::Secp256r1));
        assert_eq!(select_default_curve(300), Some(NamedGroup::Secp384r1));
        assert_eq!(select_default_curve(384), Some(NamedGroup::Secp384r1));
        assert_eq!(select_default_curve(521), Some(NamedGroup::Secp521r1));
        assert_eq!(select_default_curve(522), None);
    }

    #[test]
    fn test_compression_preference() {
        let with = [
            EcPointFormat::Uncompressed,
            EcPointFormat::AnsiX962CompressedPrime,
        ];
        let without = [EcPointFormat::Uncompressed];

        assert!(is_compression_preferred(Some(&with), NamedGroup::Secp256r1));
        assert!(!is_compression_preferred(
            Some(&without),
            NamedGroup::Secp256r1
        ));
        assert!(!is_compression_preferred(None, NamedGroup::Secp256r1));
        // X25519 has no ANSI compressed encoding
        assert!(!is_compression_preferred(Some(&with), NamedGroup::X25519));
    }

    #[test]
    fn test_dh_group_bits() {
        assert_eq!(DhGroup::Rfc3526_2048.modulus_bits(), 2048);
        assert_eq!(DhGroup::Rfc3526_4096.modulus_bits(), 4096);
    }
}
