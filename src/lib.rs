//! # VLESS Outbound
//!
//! Converts `vless://` connection links into Xray outbound configuration objects.
//!
//! ## Features
//!
//! - Parse `vless://` links into a structured [`VLess`] with defaults resolved
//! - Build the matching `streamSettings` for TLS, Reality, WebSocket, HTTP/2 and gRPC
//! - Render the outbound as indented JSON
//! - Derive a safe file name from the outbound tag
//!
//! ## Link format and parsing rules
//!
//! - **Scheme prefix**: Case-insensitive (e.g. `VLESS://` is valid).
//! - **Port**: Optional. Without one: 443 for `tls`/`reality`, 80 for `ws`/`h2`/`http`/`grpc`, 443 otherwise.
//! - **Query string**: Parsed as `application/x-www-form-urlencoded`; parameter names are case-sensitive.
//!   A key may repeat; the first value is used.
//! - **Fragment (`#`)**: Decoded and used as the outbound tag, `address:port` when missing.
//! - **Errors**: Wrong scheme → `InvalidFormat`; missing id or address → `MissingField`;
//!   bad port → `InvalidField`. An id that is not a UUID is only a logged warning.
//!
//! Conversion is pure and deterministic: the same link always yields the same JSON.
//!
//! ## Example
//!
//! ```rust
//! use vless_outbound::convert;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let outbound = convert(
//!     "vless://11111111-1111-1111-1111-111111111111@example.com:8443?type=ws&security=tls&sni=example.com#MyNode",
//! )?;
//! assert_eq!(outbound.tag, "MyNode");
//! let json = outbound.to_json_pretty()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## References
//!
//! - VLESS outbound: [XTLS VLESS](https://xtls.github.io/en/config/outbounds/vless.html)
//! - Transport: [Xray streamSettings](https://xtls.github.io/en/config/transport.html)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod constants;
mod error;
mod outbound;
mod params;
mod stream;
mod vless;

pub mod slug;

#[cfg(test)]
mod convert_comprehensive;

pub use error::{ProtocolError, Result};
pub use outbound::{Outbound, OutboundSettings, VlessUser, VnextServer};
pub use params::QueryParams;
pub use stream::{
    GrpcSettings, HttpSettings, Network, RealitySettings, Security, StreamSettings, TlsSettings,
    WsHeaders, WsSettings,
};
pub use vless::{VLess, default_port, is_uuid};

/// Convert a `vless://` link into an outbound.
///
/// # Errors
///
/// Returns `ProtocolError` if the link is not a valid `vless://` link.
/// No partial outbound is produced.
pub fn convert(link: &str) -> Result<Outbound> {
    Ok(VLess::parse(link)?.to_outbound())
}
