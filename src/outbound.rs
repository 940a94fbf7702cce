//! Xray outbound configuration model
//!
//! ```json
//! {
//!   "protocol": "vless",
//!   "tag": "...",
//!   "settings": { "vnext": [ { "address": "...", "port": 443, "users": [ { "id": "...", "encryption": "none" } ] } ] },
//!   "streamSettings": { "network": "tcp", "security": "none" }
//! }
//! ```
//!
//! A converted outbound always has exactly one `vnext` entry with exactly one user.

use crate::error::Result;
use crate::slug;
use crate::stream::StreamSettings;
use serde::{Deserialize, Serialize};

/// One outbound entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    /// Always `vless`
    pub protocol: String,
    /// Display label
    pub tag: String,
    /// Servers and users
    pub settings: OutboundSettings,
    /// Transport and security
    pub stream_settings: StreamSettings,
}

/// `settings` of a VLESS outbound
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundSettings {
    /// Server list
    pub vnext: Vec<VnextServer>,
}

/// One server of `vnext`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VnextServer {
    /// Server address
    pub address: String,
    /// Server port
    pub port: u16,
    /// Users on this server
    pub users: Vec<VlessUser>,
}

/// A VLESS user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VlessUser {
    /// User id
    pub id: String,
    /// User encryption
    pub encryption: String,
    /// Flow control, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
}

impl Outbound {
    /// Indented JSON with non-ASCII characters kept literal.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::JsonError` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name (with `.json`) derived from the tag.
    pub fn file_name(&self) -> String {
        format!("{}.json", slug::slugify(&self.tag, slug::MAX_LEN))
    }
}
