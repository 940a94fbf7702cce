//! VLess link parser
//!
//! URI format (RFC 3986): `vless://<id>@<address>[:<port>][?<query>][#<fragment>]`
//!
//! **Required**: `id` (user UUID, before `@`), `address` (host or IP).
//!
//! **Query parameters** (optional, `application/x-www-form-urlencoded`): `type`, `security`,
//! `encryption`, `flow`, plus the transport/security parameters consumed by
//! [`StreamSettings::build`].
//!
//! **Fragment**: Decoded as remark and used as the outbound tag.
//!
//! ## Parsing rules
//!
//! 1. Prefix `vless://` is case-insensitive; anything else is `InvalidFormat`.
//! 2. Missing id or address is `MissingField`; a port outside u16 is `InvalidField`.
//! 3. An id that is not a UUID is accepted with a logged warning.
//! 4. `type` defaults to `tcp`, `security` to `none`; both are lowercased.
//! 5. Without an explicit port: 443 for tls/reality, 80 for ws/h2/http/grpc, 443 otherwise.

use crate::constants::{defaults, error_msg, param, scheme};
use crate::error::{ProtocolError, Result};
use crate::outbound::{Outbound, OutboundSettings, VlessUser, VnextServer};
use crate::params::QueryParams;
use crate::stream::{Network, Security, StreamSettings};
use log::{debug, warn};
use url::{Host, Url};

/// Parsed `vless://` link with defaults resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VLess {
    /// User id, percent-decoded and trimmed
    pub id: String,
    /// Server address (IPv6 without brackets)
    pub address: String,
    /// Explicit port or the default for the security/network pair
    pub port: u16,
    /// Transport network
    pub network: Network,
    /// Security layer
    pub security: Security,
    /// User encryption, `none` unless given
    pub encryption: String,
    /// Flow control (for XTLS)
    pub flow: Option<String>,
    /// Decoded fragment, if non-empty
    pub remark: Option<String>,
    /// All query parameters
    pub params: QueryParams,
}

impl VLess {
    /// Parse a `vless://` link.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` for a wrong scheme, a missing id or address,
    /// or a link that is not a URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vless_outbound::VLess;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let link = VLess::parse("vless://11111111-1111-1111-1111-111111111111@example.com?type=ws")?;
    /// assert_eq!(link.port, 80);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(link: &str) -> Result<Self> {
        let has_scheme = link
            .get(..scheme::VLESS.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme::VLESS));
        if !has_scheme {
            return Err(ProtocolError::InvalidFormat(format!(
                "{} {}",
                error_msg::MUST_START_WITH,
                scheme::VLESS
            )));
        }

        let url = Url::parse(link)?;

        let id = percent_decode(url.username()).trim().to_string();
        if id.is_empty() {
            return Err(ProtocolError::MissingField(error_msg::MISSING_ID.to_string()));
        }
        if !is_uuid(&id) {
            warn!("id {:?} is not a UUID, keeping it as is", id);
        }

        let address = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_lowercase(),
            Some(Host::Ipv4(ip)) => ip.to_string(),
            Some(Host::Ipv6(ip)) => ip.to_string(),
            _ => {
                return Err(ProtocolError::MissingField(
                    error_msg::MISSING_ADDRESS.to_string(),
                ));
            }
        };

        let params = QueryParams::parse(url.query().unwrap_or_default());
        let network = params
            .first_non_empty(param::TYPE)
            .map(|t| Network::from(t.to_lowercase()))
            .unwrap_or_default();
        let security = params
            .first_non_empty(param::SECURITY)
            .map(|s| Security::from(s.to_lowercase()))
            .unwrap_or_default();
        let port = url
            .port()
            .filter(|p| *p != 0)
            .unwrap_or_else(|| default_port(&security, &network));

        let encryption = params
            .first_non_empty(param::ENCRYPTION)
            .unwrap_or(defaults::ENCRYPTION)
            .to_string();
        let flow = params.first_non_empty(param::FLOW).map(str::to_string);
        let remark = url
            .fragment()
            .map(percent_decode)
            .filter(|r| !r.is_empty());

        debug!(
            "parsed vless link: address={} port={} network={} security={}",
            address, port, network, security
        );

        Ok(VLess {
            id,
            address,
            port,
            network,
            security,
            encryption,
            flow,
            remark,
            params,
        })
    }

    /// Outbound tag: the remark, or `address:port` without one.
    pub fn tag(&self) -> String {
        self.remark
            .clone()
            .unwrap_or_else(|| format!("{}:{}", self.address, self.port))
    }

    /// Assemble the Xray outbound for this link.
    pub fn to_outbound(&self) -> Outbound {
        let user = VlessUser {
            id: self.id.clone(),
            encryption: self.encryption.clone(),
            flow: self.flow.clone(),
        };
        Outbound {
            protocol: scheme::PROTOCOL.to_string(),
            tag: self.tag(),
            settings: OutboundSettings {
                vnext: vec![VnextServer {
                    address: self.address.clone(),
                    port: self.port,
                    users: vec![user],
                }],
            },
            stream_settings: StreamSettings::build(&self.params, &self.security, &self.network),
        }
    }
}

/// Port used when the link has none.
pub fn default_port(security: &Security, network: &Network) -> u16 {
    if security.is_tls_based() {
        defaults::SECURE_PORT
    } else if network.is_http_like() {
        defaults::PLAIN_HTTP_PORT
    } else {
        defaults::SECURE_PORT
    }
}

/// Whether `id` is syntactically a UUID (hyphenated, simple, braced or URN form).
pub fn is_uuid(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

fn percent_decode(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}
