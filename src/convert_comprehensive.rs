//! End-to-end conversion cases
//!
//! Covers link → outbound for:
//! - scheme and required fields
//! - default port policy and explicit ports
//! - TLS / Reality exclusivity and the omission rules
//! - determinism of the rendered JSON

#![cfg(test)]

use crate::error::ProtocolError;
use crate::{Network, Security, convert};
use serde_json::{Value, json};

const ID: &str = "11111111-1111-1111-1111-111111111111";

fn to_value(link: &str) -> Value {
    serde_json::to_value(convert(link).unwrap()).unwrap()
}

// =============================================================================
// Scheme and required fields
// =============================================================================

#[test]
fn prefix_case_insensitive() {
    for prefix in ["vless://", "VLESS://", "VLeSs://"] {
        let link = format!("{}{}@host.com:443", prefix, ID);
        assert!(convert(&link).is_ok(), "prefix {} should be accepted", prefix);
    }
}

#[test]
fn other_scheme_is_invalid_format() {
    for link in ["vmess://abc", "trojan://pw@h:443", "", "vless:/x", "example.com"] {
        let err = convert(link).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidFormat(_)), "{link}: {err}");
    }
}

#[test]
fn missing_id_is_missing_field() {
    for link in ["vless://example.com:443", "vless://@example.com:443", "vless://%20@example.com"] {
        let err = convert(link).unwrap_err();
        assert!(matches!(err, ProtocolError::MissingField(_)), "{link}: {err}");
        assert!(err.is_format_error());
    }
}

#[test]
fn missing_address_fails() {
    let err = convert(&format!("vless://{ID}@:443")).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn non_uuid_id_is_kept() {
    let v = to_value("vless://my-custom-token@h.com:443");
    assert_eq!(v["settings"]["vnext"][0]["users"][0]["id"], "my-custom-token");
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn ws_tls_scenario() {
    let link = format!(
        "vless://{ID}@example.com:8443?type=ws&security=tls&sni=example.com&path=%2Fws&host=example.com#MyNode"
    );
    let out = convert(&link).unwrap();
    assert_eq!(out.tag, "MyNode");
    assert_eq!(out.settings.vnext[0].port, 8443);
    let ss = &out.stream_settings;
    assert_eq!(ss.network, Network::Ws);
    assert_eq!(ss.security, Security::Tls);
    assert_eq!(
        ss.tls_settings.as_ref().unwrap().server_name.as_deref(),
        Some("example.com")
    );
    let ws = ss.ws_settings.as_ref().unwrap();
    assert_eq!(ws.path.as_deref(), Some("/ws"));
    assert_eq!(ws.headers.as_ref().unwrap().host, "example.com");
}

#[test]
fn reality_grpc_scenario() {
    let v = to_value(&format!(
        "vless://{ID}@example.com?security=reality&type=grpc&sni=s.com&pbk=KEY&sid=ab&serviceName=grpcsvc"
    ));
    assert_eq!(v["settings"]["vnext"][0]["port"], 443);
    assert_eq!(v["tag"], "example.com:443");
    assert_eq!(
        v["streamSettings"],
        json!({
            "network": "grpc",
            "security": "reality",
            "realitySettings": {"serverName": "s.com", "publicKey": "KEY", "shortId": "ab"},
            "grpcSettings": {"serviceName": "grpcsvc"}
        })
    );
    assert!(v["streamSettings"]["grpcSettings"].get("multiMode").is_none());
}

#[test]
fn full_outbound_shape() {
    let v = to_value(&format!(
        "vless://{ID}@1.2.3.4:443?security=tls&flow=xtls-rprx-vision&encryption=none&alpn=h2&fp=chrome#%E8%8A%82%E7%82%B9"
    ));
    assert_eq!(
        v,
        json!({
            "protocol": "vless",
            "tag": "节点",
            "settings": {"vnext": [{
                "address": "1.2.3.4",
                "port": 443,
                "users": [{"id": ID, "encryption": "none", "flow": "xtls-rprx-vision"}]
            }]},
            "streamSettings": {
                "network": "tcp",
                "security": "tls",
                "tlsSettings": {"alpn": ["h2"], "fingerprint": "chrome"}
            }
        })
    );
}

// =============================================================================
// Ports
// =============================================================================

#[test]
fn explicit_port_is_kept_for_every_combination() {
    for security in ["none", "tls", "reality"] {
        for network in ["tcp", "ws", "h2", "http", "grpc"] {
            let link = format!("vless://{ID}@h.com:2053?security={security}&type={network}");
            assert_eq!(convert(&link).unwrap().settings.vnext[0].port, 2053);
        }
    }
}

#[test]
fn default_port_without_explicit_port() {
    let cases = [
        ("tls", "ws", 443),
        ("reality", "tcp", 443),
        ("none", "ws", 80),
        ("none", "h2", 80),
        ("none", "http", 80),
        ("none", "grpc", 80),
        ("none", "tcp", 443),
        ("none", "quic", 443),
    ];
    for (security, network, port) in cases {
        let link = format!("vless://{ID}@h.com?security={security}&type={network}");
        assert_eq!(
            convert(&link).unwrap().settings.vnext[0].port,
            port,
            "{security}/{network}"
        );
    }
}

// =============================================================================
// Omission rules
// =============================================================================

#[test]
fn tls_and_reality_never_co_occur() {
    let params = "sni=a.com&pbk=K&fp=chrome&sid=1";
    for security in ["none", "tls", "reality", "xtls"] {
        let v = to_value(&format!("vless://{ID}@h.com?security={security}&{params}"));
        let ss = &v["streamSettings"];
        assert!(!(ss.get("tlsSettings").is_some() && ss.get("realitySettings").is_some()));
    }
}

#[test]
fn flow_omitted_when_empty() {
    let v = to_value(&format!("vless://{ID}@h.com?flow="));
    let user = &v["settings"]["vnext"][0]["users"][0];
    assert!(user.get("flow").is_none());
    assert_eq!(user["encryption"], "none");
}

#[test]
fn empty_parameters_never_appear_as_keys() {
    let json = convert(&format!(
        "vless://{ID}@h.com?security=tls&type=ws&sni=&alpn=&fp=&path=&host="
    ))
    .unwrap()
    .to_json_pretty()
    .unwrap();
    assert!(!json.contains("\"\""));
    assert!(!json.contains("null"));
    assert!(!json.contains("tlsSettings"));
    assert!(!json.contains("wsSettings"));
}

#[test]
fn repeated_keys_use_first_value() {
    let out = convert(&format!("vless://{ID}@h.com?type=grpc&type=ws&serviceName=a&serviceName=b")).unwrap();
    assert_eq!(out.stream_settings.network, Network::Grpc);
    assert_eq!(
        out.stream_settings.grpc_settings.unwrap().service_name.as_deref(),
        Some("a")
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn same_link_same_json() {
    let link = format!(
        "vless://{ID}@example.com?type=h2&security=tls&host=a.com,b.com&path=%2Fp&alpn=h2,http%2F1.1&insecure=1#Узел"
    );
    let first = convert(&link).unwrap().to_json_pretty().unwrap();
    let second = convert(&link).unwrap().to_json_pretty().unwrap();
    assert_eq!(first, second);
    assert!(first.contains("Узел"));
}
