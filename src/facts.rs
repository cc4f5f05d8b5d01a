//! Typed extraction and ingestion validation of client extensions.
//!
//! Each known extension is parsed and validated exactly once, when the
//! client's extension map is received. Absent extensions are left as
//! `None`/`false`, never defaulted: "not offered" and "offered but empty"
//! are different facts and later decisions depend on the distinction.

use bytes::Buf;

use crate::error::{Error, Result};
use crate::extensions::ExtensionMap;
use crate::groups::NamedGroup;
use crate::protocol::{EcPointFormat, ExtensionType, MaxFragmentLength, ProtocolVersion};
use crate::signature::SignatureScheme;

/// Typed view of the client's offered extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFacts {
    /// Client requested encrypt-then-MAC (RFC 7366)
    pub encrypt_then_mac: bool,

    /// Client requested a maximum fragment length (RFC 6066)
    pub max_fragment_length: Option<MaxFragmentLength>,

    /// Client requested truncated HMAC (RFC 6066)
    pub truncated_hmac: bool,

    /// Client's advertised signature algorithms, in client order
    pub signature_algorithms: Option<Vec<SignatureScheme>>,

    /// Client's advertised groups/curves, in client order
    pub supported_groups: Option<Vec<NamedGroup>>,

    /// Client's advertised EC point formats, in client order
    pub point_formats: Option<Vec<EcPointFormat>>,

    /// Client offered the session_ticket extension
    pub session_ticket: bool,
}

impl ExtensionFacts {
    /// Extract and validate the known extensions from a client offer.
    ///
    /// `client_version` is the version the client claimed; the
    /// signature_algorithms extension is only legal from TLS 1.2 on
    /// (RFC 5246 7.4.1.4.1) and its presence at an earlier version is an
    /// illegal parameter.
    ///
    /// Unknown codepoints inside lists are skipped rather than rejected, so
    /// a list that survives as empty still counts as "offered".
    pub fn extract(extensions: &ExtensionMap, client_version: ProtocolVersion) -> Result<Self> {
        let mut facts = ExtensionFacts::default();

        if let Some(data) = extensions.get(ExtensionType::EncryptThenMac) {
            require_empty(data, "encrypt_then_mac")?;
            facts.encrypt_then_mac = true;
        }

        if let Some(data) = extensions.get(ExtensionType::MaxFragmentLength) {
            facts.max_fragment_length = Some(parse_max_fragment_length(data)?);
        }

        if let Some(data) = extensions.get(ExtensionType::TruncatedHmac) {
            require_empty(data, "truncated_hmac")?;
            facts.truncated_hmac = true;
        }

        if let Some(data) = extensions.get(ExtensionType::SignatureAlgorithms) {
            if !client_version.supports_signature_algorithms() {
                return Err(Error::IllegalParameter(format!(
                    "signature_algorithms offered at {}",
                    client_version.name()
                )));
            }
            facts.signature_algorithms = Some(parse_signature_algorithms(data)?);
        }

        if let Some(data) = extensions.get(ExtensionType::SupportedGroups) {
            facts.supported_groups = Some(parse_supported_groups(data)?);
        }

        if let Some(data) = extensions.get(ExtensionType::EcPointFormats) {
            facts.point_formats = Some(parse_point_formats(data)?);
        }

        facts.session_ticket = extensions.has(ExtensionType::SessionTicket);

        // The strict check that curves/point-format extensions require an
        // ECC cipher suite offer is deliberately not performed: the groups
        // extension also carries non-ECC finite-field groups, and the offer
        // may contain ECC suites we do not recognize.

        Ok(facts)
    }
}

fn require_empty(data: &[u8], name: &str) -> Result<()> {
    if !data.is_empty() {
        return Err(Error::IllegalParameter(format!(
            "{} extension with non-empty payload",
            name
        )));
    }
    Ok(())
}

/// Parse a `max_fragment_length` extension payload.
///
/// Exactly one byte, drawn from the RFC 6066 enumerated set.
fn parse_max_fragment_length(data: &[u8]) -> Result<MaxFragmentLength> {
    if data.len() != 1 {
        return Err(Error::IllegalParameter(
            "max_fragment_length payload must be one byte".into(),
        ));
    }
    MaxFragmentLength::from_u8(data[0]).ok_or_else(|| {
        Error::IllegalParameter(format!("Invalid max_fragment_length code: {}", data[0]))
    })
}

/// Parse a `signature_algorithms` extension payload.
fn parse_signature_algorithms(data: &[u8]) -> Result<Vec<SignatureScheme>> {
    let mut bytes = data;
    if bytes.len() < 2 {
        return Err(Error::IllegalParameter(
            "signature_algorithms extension too short".into(),
        ));
    }

    let list_len = bytes.get_u16() as usize;
    if bytes.len() != list_len || list_len % 2 != 0 {
        return Err(Error::IllegalParameter(
            "Malformed signature_algorithms list".into(),
        ));
    }

    let mut schemes = Vec::new();
    while bytes.has_remaining() {
        let codepoint = bytes.get_u16();
        if let Some(scheme) = SignatureScheme::from_u16(codepoint) {
            schemes.push(scheme);
        }
        // Ignore unknown algorithms (graceful degradation)
    }

    Ok(schemes)
}

/// Parse a `supported_groups` extension payload.
fn parse_supported_groups(data: &[u8]) -> Result<Vec<NamedGroup>> {
    let mut bytes = data;
    if bytes.len() < 2 {
        return Err(Error::IllegalParameter(
            "supported_groups extension too short".into(),
        ));
    }

    let list_len = bytes.get_u16() as usize;
    if bytes.len() != list_len || list_len % 2 != 0 {
        return Err(Error::IllegalParameter(
            "Malformed supported_groups list".into(),
        ));
    }

    let mut groups = Vec::new();
    while bytes.has_remaining() {
        let codepoint = bytes.get_u16();
        if let Some(group) = NamedGroup::from_u16(codepoint) {
            groups.push(group);
        }
        // Ignore unknown groups (graceful degradation)
    }

    Ok(groups)
}

/// Parse an `ec_point_formats` extension payload.
fn parse_point_formats(data: &[u8]) -> Result<Vec<EcPointFormat>> {
    let mut bytes = data;
    if bytes.is_empty() {
        return Err(Error::IllegalParameter(
            "ec_point_formats extension too short".into(),
        ));
    }

    let list_len = bytes.get_u8() as usize;
    if bytes.len() != list_len {
        return Err(Error::IllegalParameter(
            "Malformed ec_point_formats list".into(),
        ));
    }

    let mut formats = Vec::new();
    while bytes.has_remaining() {
        if let Some(format) = EcPointFormat::from_u8(bytes.get_u8()) {
            formats.push(format);
        }
    }

    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extension;

    fn map(entries: Vec<Extension>) -> ExtensionMap {
        let mut m = ExtensionMap::new();
        for e in entries {
            m.insert(e).unwrap();
        }
        m
    }

    #[test]
    fn test_empty_map_yields_not_offered() {
        let facts = ExtensionFacts::extract(&ExtensionMap::new(), ProtocolVersion::Tls12).unwrap();
        assert!(!facts.encrypt_then_mac);
        assert!(!facts.truncated_hmac);
        assert_eq!(facts.max_fragment_length, None);
        assert_eq!(facts.signature_algorithms, None);
        assert_eq!(facts.supported_groups, None);
        assert_eq!(facts.point_formats, None);
        assert!(!facts.session_ticket);
    }

    #[test]
    fn test_flag_extensions() {
        let m = map(vec![
            Extension::empty(ExtensionType::EncryptThenMac),
            Extension::empty(ExtensionType::TruncatedHmac),
            Extension::empty(ExtensionType::SessionTicket),
        ]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap();
        assert!(facts.encrypt_then_mac);
        assert!(facts.truncated_hmac);
        assert!(facts.session_ticket);
    }

    #[test]
    fn test_flag_extension_with_payload_rejected() {
        let m = map(vec![Extension::new(ExtensionType::EncryptThenMac, vec![0])]);
        let err = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap_err();
        assert!(matches!(err, Error::IllegalParameter(_)));
    }

    #[test]
    fn test_max_fragment_length_valid() {
        let m = map(vec![Extension::new(
            ExtensionType::MaxFragmentLength,
            vec![2],
        )]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls10).unwrap();
        assert_eq!(facts.max_fragment_length, Some(MaxFragmentLength::Pow10));
    }

    #[test]
    fn test_max_fragment_length_illegal_code() {
        let m = map(vec![Extension::new(
            ExtensionType::MaxFragmentLength,
            vec![9],
        )]);
        let err = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap_err();
        assert!(matches!(err, Error::IllegalParameter(_)));
    }

    #[test]
    fn test_max_fragment_length_wrong_size() {
        let m = map(vec![Extension::new(
            ExtensionType::MaxFragmentLength,
            vec![1, 2],
        )]);
        assert!(ExtensionFacts::extract(&m, ProtocolVersion::Tls12).is_err());
    }

    #[test]
    fn test_signature_algorithms_version_gate() {
        // 0x0403 ecdsa_secp256r1_sha256
        let payload = vec![0x00, 0x02, 0x04, 0x03];
        let m = map(vec![Extension::new(
            ExtensionType::SignatureAlgorithms,
            payload.clone(),
        )]);

        let err = ExtensionFacts::extract(&m, ProtocolVersion::Tls11).unwrap_err();
        assert!(matches!(err, Error::IllegalParameter(_)));

        let m = map(vec![Extension::new(
            ExtensionType::SignatureAlgorithms,
            payload,
        )]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap();
        assert_eq!(
            facts.signature_algorithms,
            Some(vec![SignatureScheme::EcdsaSecp256r1Sha256])
        );
    }

    #[test]
    fn test_supported_groups_unknown_skipped() {
        // secp256r1 (23), unknown (999), secp384r1 (24)
        let payload = vec![0x00, 0x06, 0x00, 23, 0x03, 0xE7, 0x00, 24];
        let m = map(vec![Extension::new(ExtensionType::SupportedGroups, payload)]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap();
        assert_eq!(
            facts.supported_groups,
            Some(vec![NamedGroup::Secp256r1, NamedGroup::Secp384r1])
        );
    }

    #[test]
    fn test_supported_groups_offered_but_empty() {
        let m = map(vec![Extension::new(
            ExtensionType::SupportedGroups,
            vec![0x00, 0x00],
        )]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap();
        assert_eq!(facts.supported_groups, Some(vec![]));
    }

    #[test]
    fn test_supported_groups_truncated() {
        let m = map(vec![Extension::new(
            ExtensionType::SupportedGroups,
            vec![0x00, 0x04, 0x00, 23],
        )]);
        assert!(ExtensionFacts::extract(&m, ProtocolVersion::Tls12).is_err());
    }

    #[test]
    fn test_point_formats() {
        let m = map(vec![Extension::new(
            ExtensionType::EcPointFormats,
            vec![0x02, 0x00, 0x01],
        )]);
        let facts = ExtensionFacts::extract(&m, ProtocolVersion::Tls12).unwrap();
        assert_eq!(
            facts.point_formats,
            Some(vec![
                EcPointFormat::Uncompressed,
                EcPointFormat::AnsiX962CompressedPrime
            ])
        );
    }
}
