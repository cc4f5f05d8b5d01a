//! Server-side parameter negotiation engine.
//!
//! One `ServerNegotiation` instance serves exactly one handshake. The
//! orchestrator feeds the client's offer in a fixed order, then queries each
//! decision in a fixed order; every decision is computed once, cached, and
//! immutable from then on.
//!
//! ## State Transitions
//! ```text
//! AWAITING_CLIENT_OFFER
//!   | notify_client_version
//!   | notify_fallback
//!   | notify_offered_cipher_suites
//!   | notify_offered_compression_methods
//!   | process_client_extensions
//!   | server_version
//!   v
//! VERSION_CHOSEN
//!   | selected_cipher_suite
//!   v
//! CIPHER_CHOSEN
//!   | selected_compression_method
//!   v
//! COMPRESSION_CHOSEN
//!   | key_exchange_config
//!   v
//! GROUP_CHOSEN
//!   | server_extensions
//!   v
//! EXTENSIONS_FINALIZED
//!   | new_session_ticket
//!   v
//! DONE
//! ```
//!
//! Transitions are strictly linear; any failure is terminal and leaves the
//! engine in `Failed`.

use crate::capabilities::{CertificateRequest, CertificateStatus, ServerCapabilities};
use crate::cipher_suites::{CipherSuite, KeyExchange};
use crate::error::{Error, Result};
use crate::extensions::{Extension, ExtensionMap};
use crate::facts::ExtensionFacts;
use crate::groups::{self, DhConfig, EcConfig, KeyExchangeConfig};
use crate::protocol::{CompressionMethod, EcPointFormat, ExtensionType, ProtocolVersion};
use crate::signature;
use crate::ticket::NewSessionTicket;

/// Negotiation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Collecting the client's offer
    AwaitingClientOffer,
    /// Protocol version selected
    VersionChosen,
    /// Cipher suite selected
    CipherChosen,
    /// Compression method selected
    CompressionChosen,
    /// Group/curve parameters selected
    GroupChosen,
    /// Server extension response set finalized
    ExtensionsFinalized,
    /// Negotiation complete
    Done,
    /// Terminal failure
    Failed,
}

/// Server-side negotiation engine, bound to a single handshake.
///
/// Not safe for concurrent use; the owning orchestrator serializes calls per
/// connection and discards the instance at handshake end or failure.
pub struct ServerNegotiation<'a> {
    caps: &'a dyn ServerCapabilities,
    state: NegotiationState,

    // Client offer, immutable once received
    client_version: Option<ProtocolVersion>,
    offered_cipher_suites: Option<Vec<u16>>,
    offered_compression_methods: Option<Vec<u8>>,
    facts: Option<ExtensionFacts>,

    // Decisions, populated progressively in the fixed order
    server_version: Option<ProtocolVersion>,
    selected_cipher_suite: Option<CipherSuite>,
    selected_compression_method: Option<CompressionMethod>,
    key_exchange_config: Option<KeyExchangeConfig>,
    server_extensions: Option<ExtensionMap>,
}

impl<'a> ServerNegotiation<'a> {
    /// Create an engine for one handshake against the given capabilities.
    pub fn new(caps: &'a dyn ServerCapabilities) -> Self {
        Self {
            caps,
            state: NegotiationState::AwaitingClientOffer,
            client_version: None,
            offered_cipher_suites: None,
            offered_compression_methods: None,
            facts: None,
            server_version: None,
            selected_cipher_suite: None,
            selected_compression_method: None,
            key_exchange_config: None,
            server_extensions: None,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Record the client's claimed protocol version.
    pub fn notify_client_version(&mut self, version: ProtocolVersion) -> Result<()> {
        self.require_offer_phase("notify_client_version")?;
        self.client_version = Some(version);
        Ok(())
    }

    /// Apply the downgrade/fallback guard (RFC 7507).
    ///
    /// A fallback retry from a client whose claimed version is below our
    /// maximum indicates a possible downgrade attack and must be rejected.
    pub fn notify_fallback(&mut self, is_fallback: bool) -> Result<()> {
        self.require_offer_phase("notify_fallback")?;
        let client_version = self.require_client_version()?;

        if is_fallback && self.caps.maximum_version() > client_version {
            return Err(self.fail(Error::InappropriateFallback));
        }
        Ok(())
    }

    /// Record the client's offered cipher suite identifiers.
    ///
    /// The list is kept raw: it may contain SCSV sentinels and suites this
    /// server does not recognize.
    pub fn notify_offered_cipher_suites(&mut self, offered: &[u16]) -> Result<()> {
        self.require_offer_phase("notify_offered_cipher_suites")?;
        self.offered_cipher_suites = Some(offered.to_vec());
        Ok(())
    }

    /// Record the client's offered compression method identifiers.
    pub fn notify_offered_compression_methods(&mut self, offered: &[u8]) -> Result<()> {
        self.require_offer_phase("notify_offered_compression_methods")?;
        self.offered_compression_methods = Some(offered.to_vec());
        Ok(())
    }

    /// Ingest and validate the client's extension mapping.
    ///
    /// Extraction failures (malformed payloads, version-forbidden
    /// extensions) surface here, before any negotiation decision is made.
    pub fn process_client_extensions(&mut self, extensions: &ExtensionMap) -> Result<()> {
        self.require_offer_phase("process_client_extensions")?;
        let client_version = self.require_client_version()?;

        match ExtensionFacts::extract(extensions, client_version) {
            Ok(facts) => {
                self.facts = Some(facts);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Negotiate the protocol version.
    ///
    /// A client below the configured minimum is rejected; a client within
    /// the band is matched verbatim; a client above the maximum is served at
    /// the maximum. The server never selects outside its own band.
    pub fn server_version(&mut self) -> Result<ProtocolVersion> {
        if let Some(version) = self.server_version {
            return Ok(version);
        }
        self.require_state(NegotiationState::AwaitingClientOffer, "server_version")?;
        self.require_offer_complete()?;
        let client_version = self.require_client_version()?;

        let minimum = self.caps.minimum_version();
        let maximum = self.caps.maximum_version();
        if client_version < minimum {
            return Err(self.fail(Error::ProtocolVersion(format!(
                "Client version {} below minimum {}",
                client_version.name(),
                minimum.name()
            ))));
        }

        let version = if client_version <= maximum {
            client_version
        } else {
            maximum
        };

        tracing::debug!(version = version.name(), "negotiated protocol version");
        self.server_version = Some(version);
        self.state = NegotiationState::VersionChosen;
        Ok(version)
    }

    /// Negotiate the cipher suite.
    ///
    /// Server preference order wins. A candidate qualifies only if the
    /// client offered it, it is valid at the negotiated version, the
    /// client's groups leave enough curve strength for it, and its signature
    /// requirement is satisfiable by the usable signature algorithm list
    /// (RFC 5246 7.4.3).
    pub fn selected_cipher_suite(&mut self) -> Result<CipherSuite> {
        if let Some(suite) = self.selected_cipher_suite {
            return Ok(suite);
        }
        self.require_state(NegotiationState::VersionChosen, "selected_cipher_suite")?;

        let version = self.require_decided(self.server_version, "server version")?;
        let facts = self.require_facts()?;
        let offered = match self.offered_cipher_suites.as_deref() {
            Some(offered) => offered,
            None => {
                return Err(Error::InternalError(
                    "Offered cipher suites missing".into(),
                ))
            }
        };

        let usable_sigs = signature::usable_signature_schemes(
            facts.signature_algorithms.as_deref(),
            &self.caps.signature_schemes(),
        );
        let available_curve_bits =
            groups::max_negotiable_curve_bits(facts.supported_groups.as_deref());

        let mut selected = None;
        for suite in self.caps.cipher_suites() {
            if !offered.contains(&suite.to_u16()) {
                continue;
            }
            if !suite.is_valid_for_version(version) {
                continue;
            }
            if available_curve_bits < suite.minimum_curve_bits() {
                continue;
            }
            if let Some(kind) = suite.signature_kind() {
                if !signature::satisfies_kind(&usable_sigs, kind) {
                    continue;
                }
            }
            selected = Some(suite);
            break;
        }

        let suite = match selected {
            Some(suite) => suite,
            None => {
                return Err(self.fail(Error::HandshakeFailure(
                    "No mutually acceptable cipher suite".into(),
                )))
            }
        };

        tracing::debug!(suite = suite.name(), "negotiated cipher suite");
        self.selected_cipher_suite = Some(suite);
        self.state = NegotiationState::CipherChosen;
        Ok(suite)
    }

    /// Negotiate the compression method.
    ///
    /// First entry of the server's list also present in the client's offer.
    pub fn selected_compression_method(&mut self) -> Result<CompressionMethod> {
        if let Some(method) = self.selected_compression_method {
            return Ok(method);
        }
        self.require_state(
            NegotiationState::CipherChosen,
            "selected_compression_method",
        )?;
        let offered = match self.offered_compression_methods.as_deref() {
            Some(offered) => offered,
            None => {
                return Err(Error::InternalError(
                    "Offered compression methods missing".into(),
                ))
            }
        };

        let method = self
            .caps
            .compression_methods()
            .into_iter()
            .find(|m| offered.contains(&m.to_u8()));

        let method = match method {
            Some(method) => method,
            None => {
                return Err(self.fail(Error::HandshakeFailure(
                    "No mutually acceptable compression method".into(),
                )))
            }
        };

        self.selected_compression_method = Some(method);
        self.state = NegotiationState::CompressionChosen;
        Ok(method)
    }

    /// Select the key exchange group parameters for the chosen suite.
    ///
    /// For EC suites the curve comes from the client's advertised list (or
    /// the cofactor-1 default tier when no list was sent). Failure here is
    /// an internal-consistency error, not a peer fault: cipher selection
    /// already verified, with the same strength arithmetic, that a
    /// qualifying curve exists.
    pub fn key_exchange_config(&mut self) -> Result<KeyExchangeConfig> {
        if let Some(config) = self.key_exchange_config {
            return Ok(config);
        }
        self.require_state(NegotiationState::CompressionChosen, "key_exchange_config")?;

        let suite = self.require_decided(self.selected_cipher_suite, "cipher suite")?;
        let facts = self.require_facts()?;

        let config = match suite.key_exchange() {
            KeyExchange::EcdheRsa | KeyExchange::EcdheEcdsa => {
                let minimum_curve_bits = suite.minimum_curve_bits();
                let group = groups::select_curve(
                    facts.supported_groups.as_deref(),
                    minimum_curve_bits,
                );
                let group = match group {
                    Some(group) => group,
                    None => {
                        tracing::error!(
                            suite = suite.name(),
                            minimum_curve_bits,
                            "no qualifying curve for an already-selected suite"
                        );
                        return Err(self.fail(Error::InternalError(
                            "Curve selection failed after cipher selection".into(),
                        )));
                    }
                };
                let point_compression =
                    groups::is_compression_preferred(facts.point_formats.as_deref(), group);
                KeyExchangeConfig::Ecdhe(EcConfig {
                    group,
                    point_compression,
                })
            }
            KeyExchange::DheRsa => KeyExchangeConfig::Dhe(DhConfig {
                group: self.caps.dh_parameters(),
            }),
            KeyExchange::Rsa => KeyExchangeConfig::None,
        };

        self.key_exchange_config = Some(config);
        self.state = NegotiationState::GroupChosen;
        Ok(config)
    }

    /// Finalize the server's extension response set.
    ///
    /// Entries appear only for extensions the client offered, each under its
    /// own eligibility condition:
    /// - encrypt_then_mac: policy allows it and the suite is a block cipher
    ///   (RFC 7366 3 forbids it for stream/AEAD suites)
    /// - max_fragment_length: echoed verbatim (already validated at
    ///   ingestion)
    /// - truncated_hmac: policy allows it
    /// - ec_point_formats: EC suite selected; the response is always the
    ///   fixed full set of formats we can parse (RFC 4492 5.2)
    pub fn server_extensions(&mut self) -> Result<&ExtensionMap> {
        if self.server_extensions.is_none() {
            self.require_state(NegotiationState::GroupChosen, "server_extensions")?;
            let suite = self.require_decided(self.selected_cipher_suite, "cipher suite")?;
            let facts = self.require_facts()?.clone();

            let mut map = ExtensionMap::new();

            if facts.encrypt_then_mac
                && self.caps.allow_encrypt_then_mac()
                && suite.is_block_cipher()
            {
                map.insert(Extension::empty(ExtensionType::EncryptThenMac))?;
            }

            if let Some(mfl) = facts.max_fragment_length {
                map.insert(Extension::new(
                    ExtensionType::MaxFragmentLength,
                    vec![mfl.to_u8()],
                ))?;
            }

            if facts.truncated_hmac && self.caps.allow_truncated_hmac() {
                map.insert(Extension::empty(ExtensionType::TruncatedHmac))?;
            }

            if facts.point_formats.is_some() && suite.is_ec() {
                map.insert(Extension::new(
                    ExtensionType::EcPointFormats,
                    vec![
                        3,
                        EcPointFormat::Uncompressed.to_u8(),
                        EcPointFormat::AnsiX962CompressedPrime.to_u8(),
                        EcPointFormat::AnsiX962CompressedChar2.to_u8(),
                    ],
                ))?;
            }

            self.server_extensions = Some(map);
            self.state = NegotiationState::ExtensionsFinalized;
        }

        match self.server_extensions.as_ref() {
            Some(map) => Ok(map),
            None => Err(Error::InternalError("Server extensions not built".into())),
        }
    }

    /// Certificate request policy; `None` means no client auth.
    pub fn certificate_request(&self) -> Result<Option<CertificateRequest>> {
        self.require_finalized("certificate_request")?;
        Ok(self.caps.certificate_request())
    }

    /// Certificate status (OCSP stapling) policy; `None` declines.
    pub fn certificate_status(&self) -> Result<Option<CertificateStatus>> {
        self.require_finalized("certificate_status")?;
        Ok(self.caps.certificate_status())
    }

    /// Issue the session resumption ticket.
    ///
    /// Default capability policy declines via a zero-lifetime, empty ticket.
    pub fn new_session_ticket(&mut self) -> Result<NewSessionTicket> {
        self.require_finalized("new_session_ticket")?;
        self.state = NegotiationState::Done;
        Ok(self.caps.new_session_ticket())
    }

    /// Whether the client offered the session_ticket extension.
    pub fn session_ticket_offered(&self) -> bool {
        self.facts.as_ref().map(|f| f.session_ticket).unwrap_or(false)
    }

    /// Guard against unsolicited supplemental data.
    pub fn process_client_supplemental_data(&mut self, supplemental: Option<&[u8]>) -> Result<()> {
        if supplemental.is_some() {
            return Err(self.fail(Error::UnexpectedMessage(
                "Unsolicited client supplemental data".into(),
            )));
        }
        Ok(())
    }

    /// Guard against a client certificate the server did not ask for.
    ///
    /// Validation of an accepted certificate belongs to the external
    /// certificate layer; the engine only enforces the policy gate.
    pub fn notify_client_certificate(&mut self, _certificate: &[u8]) -> Result<()> {
        if !self.caps.accept_client_certificates() {
            return Err(self.fail(Error::UnexpectedMessage(
                "Client certificate presented but not accepted".into(),
            )));
        }
        Ok(())
    }

    fn fail(&mut self, error: Error) -> Error {
        self.state = NegotiationState::Failed;
        error
    }

    fn require_state(&self, expected: NegotiationState, operation: &str) -> Result<()> {
        if self.state != expected {
            return Err(Error::InternalError(format!(
                "Cannot run {} in state {:?}",
                operation, self.state
            )));
        }
        Ok(())
    }

    fn require_offer_phase(&self, operation: &str) -> Result<()> {
        self.require_state(NegotiationState::AwaitingClientOffer, operation)
    }

    fn require_finalized(&self, operation: &str) -> Result<()> {
        match self.state {
            NegotiationState::ExtensionsFinalized | NegotiationState::Done => Ok(()),
            state => Err(Error::InternalError(format!(
                "Cannot run {} in state {:?}",
                operation, state
            ))),
        }
    }

    fn require_client_version(&self) -> Result<ProtocolVersion> {
        self.client_version
            .ok_or_else(|| Error::InternalError("Client version not received".into()))
    }

    fn require_facts(&self) -> Result<&ExtensionFacts> {
        self.facts
            .as_ref()
            .ok_or_else(|| Error::InternalError("Client extensions not processed".into()))
    }

    fn require_decided<T: Copy>(&self, decision: Option<T>, name: &str) -> Result<T> {
        decision.ok_or_else(|| Error::InternalError(format!("{} not decided", name)))
    }

    fn require_offer_complete(&self) -> Result<()> {
        if self.client_version.is_none()
            || self.offered_cipher_suites.is_none()
            || self.offered_compression_methods.is_none()
            || self.facts.is_none()
        {
            return Err(Error::InternalError("Client offer incomplete".into()));
        }
        Ok(())
    }
}

impl core::fmt::Debug for ServerNegotiation<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServerNegotiation")
            .field("state", &self.state)
            .field("client_version", &self.client_version)
            .field("server_version", &self.server_version)
            .field("selected_cipher_suite", &self.selected_cipher_suite)
            .field(
                "selected_compression_method",
                &self.selected_compression_method,
            )
            .finish_non_exhaustive()
    }
}
