//! # TLS Server Negotiation
//!
//! Server-side handshake parameter negotiation for TLS.
//!
//! Given the parameters a client offers (protocol version, cipher suites,
//! compression methods, extensions), this crate deterministically derives the
//! server's chosen version, cipher suite, compression method, group/curve
//! parameters and extension response set, enforcing the protocol's
//! interoperability and anti-downgrade rules.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │    Handshake orchestrator (external)    │
//! └─────────────────┬───────────────────────┘
//!                   │ client offer in / decisions out
//! ┌─────────────────▼───────────────────────┐
//! │      ServerNegotiation (this crate)     │
//! │  ┌──────────────────────────────────┐   │
//! │  │   Extension Fact Extraction      │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Version / Cipher / Compression │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Group & Curve Selection        │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Extension Response Builder     │   │
//! │  └──────────────────────────────────┘   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   ServerCapabilities (policy seam)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Everything else about a handshake is an external collaborator: wire
//! encoding, the record layer, the cryptographic primitives, certificate
//! validation, and message ordering. The engine is pure decision logic over
//! already-parsed inputs and performs no I/O.
//!
//! One [`engine::ServerNegotiation`] instance is bound to exactly one
//! handshake; it is not reusable and not safe for concurrent access.
//! Connection-level parallelism comes from running independent instances.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_qualifications
)]
#![forbid(unsafe_code)]

pub mod capabilities;
pub mod cipher_suites;
pub mod engine;
pub mod error;
pub mod extensions;
pub mod facts;
pub mod groups;
pub mod protocol;
pub mod signature;
pub mod ticket;

pub use capabilities::{DefaultServerCapabilities, ServerCapabilities};
pub use cipher_suites::CipherSuite;
pub use engine::{NegotiationState, ServerNegotiation};
pub use error::{AlertDescription, Error, Result};
pub use protocol::{CompressionMethod, ProtocolVersion};
