//! Shared constants for the link scheme, defaults, and query parameter names.
//!
//! Centralizes magic strings so the parser and the stream builder agree on them.

/// URI scheme prefix (lowercase, with `://`).
pub mod scheme {
    /// VLESS: `vless://`
    pub const VLESS: &str = "vless://";
    /// Value of the outbound `protocol` field.
    pub const PROTOCOL: &str = "vless";
}

/// Values used when the link does not carry them.
pub mod defaults {
    /// Default user encryption.
    pub const ENCRYPTION: &str = "none";
    /// Port used with TLS/Reality, or on plain TCP.
    pub const SECURE_PORT: u16 = 443;
    /// Port used for HTTP-like transports without a security layer.
    pub const PLAIN_HTTP_PORT: u16 = 80;
}

/// Query parameter names understood by the converter (case-sensitive).
pub mod param {
    pub const TYPE: &str = "type";
    pub const SECURITY: &str = "security";
    pub const ENCRYPTION: &str = "encryption";
    pub const FLOW: &str = "flow";
    pub const SNI: &str = "sni";
    pub const ALPN: &str = "alpn";
    pub const FP: &str = "fp";
    pub const INSECURE: &str = "insecure";
    pub const ALLOW_INSECURE: &str = "allowInsecure";
    pub const PBK: &str = "pbk";
    pub const SID: &str = "sid";
    pub const SPX: &str = "spx";
    pub const PATH: &str = "path";
    pub const HOST: &str = "host";
    pub const HOST_HEADER: &str = "hostHeader";
    pub const SERVICE_NAME: &str = "serviceName";
    pub const MODE: &str = "mode";
}

/// Common error message fragments for link parsing.
pub mod error_msg {
    /// Link must start with scheme (placeholder: use with format!).
    pub const MUST_START_WITH: &str = "Link must start with";
    /// Missing user id before `@`.
    pub const MISSING_ID: &str = "id (part before '@')";
    /// Missing hostname.
    pub const MISSING_ADDRESS: &str = "address";
    /// Invalid port value.
    pub const INVALID_PORT: &str = "Invalid port";
}
