//! Stream settings builder
//!
//! Turns the security mode, the transport network, and the link's query parameters
//! into the `streamSettings` object of an Xray outbound.
//!
//! ## Inclusion rules
//!
//! - A field is emitted only when its source parameter is present and non-empty.
//!   Reality's `serverName` and `publicKey` are the exception: always emitted.
//! - `tlsSettings` / `realitySettings` exist only for `security=tls` / `security=reality`.
//! - `wsSettings`, `httpSettings` (`h2` and `http`), `grpcSettings` exist only for their
//!   network and only when at least one field was derived. Empty objects are never emitted.
//! - Unrecognized security or network values pass through as strings with no sub-object.
//!
//! Building never fails.

use crate::constants::param;
use crate::params::{QueryParams, parse_bool, split_list};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport network (`type` query parameter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Network {
    /// Raw TCP (default)
    #[default]
    Tcp,
    /// WebSocket
    Ws,
    /// HTTP/2
    H2,
    /// HTTP/2, alternative name
    Http,
    /// gRPC
    Grpc,
    /// Anything else, kept verbatim
    Other(String),
}

impl Network {
    /// Name as written in the configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Network::Tcp => "tcp",
            Network::Ws => "ws",
            Network::H2 => "h2",
            Network::Http => "http",
            Network::Grpc => "grpc",
            Network::Other(s) => s,
        }
    }

    /// Whether the transport is carried over HTTP (and defaults to port 80 without security).
    pub fn is_http_like(&self) -> bool {
        matches!(self, Network::Ws | Network::H2 | Network::Http | Network::Grpc)
    }
}

impl From<String> for Network {
    fn from(s: String) -> Self {
        match s.as_str() {
            "tcp" => Network::Tcp,
            "ws" => Network::Ws,
            "h2" => Network::H2,
            "http" => Network::Http,
            "grpc" => Network::Grpc,
            _ => Network::Other(s),
        }
    }
}

impl From<Network> for String {
    fn from(n: Network) -> Self {
        match n {
            Network::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security layer (`security` query parameter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Security {
    /// No security layer (default)
    #[default]
    None,
    /// TLS
    Tls,
    /// Reality
    Reality,
    /// Anything else, kept verbatim
    Other(String),
}

impl Security {
    /// Name as written in the configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Security::None => "none",
            Security::Tls => "tls",
            Security::Reality => "reality",
            Security::Other(s) => s,
        }
    }

    /// TLS or Reality.
    pub fn is_tls_based(&self) -> bool {
        matches!(self, Security::Tls | Security::Reality)
    }
}

impl From<String> for Security {
    fn from(s: String) -> Self {
        match s.as_str() {
            "none" => Security::None,
            "tls" => Security::Tls,
            "reality" => Security::Reality,
            _ => Security::Other(s),
        }
    }
}

impl From<Security> for String {
    fn from(s: Security) -> Self {
        match s {
            Security::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `tlsSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    /// SNI (`sni`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    /// ALPN list (`alpn`, comma separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    /// uTLS fingerprint (`fp`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Skip certificate verification (`insecure`, then `allowInsecure`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_insecure: Option<bool>,
}

impl TlsSettings {
    fn from_params(params: &QueryParams) -> Self {
        TlsSettings {
            server_name: non_empty(params, param::SNI),
            alpn: params
                .first_non_empty(param::ALPN)
                .map(split_list)
                .filter(|list| !list.is_empty()),
            fingerprint: non_empty(params, param::FP),
            // The first present key decides; an empty value suppresses the field
            // even when the other key carries one.
            allow_insecure: params
                .first_present_of(&[param::INSECURE, param::ALLOW_INSECURE])
                .filter(|v| !v.is_empty())
                .map(parse_bool),
        }
    }

    fn is_empty(&self) -> bool {
        *self == TlsSettings::default()
    }
}

/// `realitySettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    /// SNI (`sni`), emitted even when empty
    pub server_name: String,
    /// Server public key (`pbk`), emitted even when empty
    pub public_key: String,
    /// uTLS fingerprint (`fp`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Short id (`sid`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    /// Spider path (`spx`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spider_x: Option<String>,
}

impl RealitySettings {
    fn from_params(params: &QueryParams) -> Self {
        RealitySettings {
            server_name: params.first(param::SNI).unwrap_or_default().to_string(),
            public_key: params.first(param::PBK).unwrap_or_default().to_string(),
            fingerprint: non_empty(params, param::FP),
            short_id: non_empty(params, param::SID),
            spider_x: non_empty(params, param::SPX),
        }
    }
}

/// Headers of `wsSettings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WsHeaders {
    /// `Host` header
    #[serde(rename = "Host")]
    pub host: String,
}

/// `wsSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WsSettings {
    /// Request path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Request headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<WsHeaders>,
}

/// `httpSettings`, used by `h2` and `http`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpSettings {
    /// Request path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Candidate hosts (`host`, comma separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,
}

/// `grpcSettings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    /// Service name (`serviceName`, then `path`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Multiplexed mode; false only for `mode=gun`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_mode: Option<bool>,
}

/// `streamSettings` of an outbound
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    /// Transport network
    pub network: Network,
    /// Security layer
    pub security: Security,
    /// Present only with `security=tls`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsSettings>,
    /// Present only with `security=reality`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<RealitySettings>,
    /// Present only with `type=ws`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WsSettings>,
    /// Present only with `type=h2` or `type=http`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpSettings>,
    /// Present only with `type=grpc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcSettings>,
}

impl StreamSettings {
    /// Build stream settings from already-resolved security and network.
    pub fn build(params: &QueryParams, security: &Security, network: &Network) -> Self {
        let mut ss = StreamSettings {
            network: network.clone(),
            security: security.clone(),
            ..StreamSettings::default()
        };

        match security {
            Security::Tls => {
                ss.tls_settings = Some(TlsSettings::from_params(params)).filter(|t| !t.is_empty());
            }
            Security::Reality => {
                ss.reality_settings = Some(RealitySettings::from_params(params));
            }
            Security::None | Security::Other(_) => {}
        }

        match network {
            Network::Ws => {
                let ws = WsSettings {
                    path: non_empty(params, param::PATH),
                    headers: params
                        .first_non_empty_of(&[param::HOST, param::HOST_HEADER])
                        .map(|host| WsHeaders {
                            host: host.to_string(),
                        }),
                };
                ss.ws_settings = Some(ws).filter(|w| *w != WsSettings::default());
            }
            Network::H2 | Network::Http => {
                let http = HttpSettings {
                    path: non_empty(params, param::PATH),
                    host: params
                        .first_non_empty(param::HOST)
                        .map(split_list)
                        .filter(|hosts| !hosts.is_empty()),
                };
                ss.http_settings = Some(http).filter(|h| *h != HttpSettings::default());
            }
            Network::Grpc => {
                let grpc = GrpcSettings {
                    service_name: params
                        .first_non_empty_of(&[param::SERVICE_NAME, param::PATH])
                        .map(str::to_string),
                    multi_mode: params
                        .first_non_empty(param::MODE)
                        .map(|mode| !mode.eq_ignore_ascii_case("gun")),
                };
                ss.grpc_settings = Some(grpc).filter(|g| *g != GrpcSettings::default());
            }
            Network::Tcp | Network::Other(_) => {}
        }

        ss
    }
}

fn non_empty(params: &QueryParams, key: &str) -> Option<String> {
    params.first_non_empty(key).map(str::to_string)
}
