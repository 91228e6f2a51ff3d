//! Client address resolution from proxy headers.
//!
//! # Design Decisions
//! - Headers are trusted as-is; the service is expected to sit behind a single
//!   known reverse proxy that overwrites them
//! - Resolution never fails; an empty string is denied by any non-empty allowlist

use axum::http::HeaderMap;

/// Single client address set by Cloudflare.
pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
/// Comma-separated chain, originating client first.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single client address set by nginx-style proxies.
pub const X_REAL_IP: &str = "x-real-ip";

/// Best-effort originating client address.
///
/// Headers are checked in priority order and the first one present with a
/// non-empty value wins, even if it trims down to nothing or is not valid
/// text. The transport peer is only consulted when none of them is set.
pub fn resolve_client_ip(headers: &HeaderMap, peer: &str) -> String {
    if let Some(ip) = header_value(headers, CF_CONNECTING_IP) {
        return ip.trim().to_string();
    }
    if let Some(chain) = header_value(headers, X_FORWARDED_FOR) {
        let first = chain.split(',').next().unwrap_or_default();
        return first.trim().to_string();
    }
    if let Some(ip) = header_value(headers, X_REAL_IP) {
        return ip.trim().to_string();
    }

    split_host_port(peer).unwrap_or_default().to_string()
}

/// Non-empty header value. Bytes outside UTF-8 are replaced, so the result
/// never parses as an address and fails closed.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .filter(|v| !v.is_empty())
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

/// Host part of `host:port` or `[host]:port`.
fn split_host_port(addr: &str) -> Option<&str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        let port = tail.strip_prefix(':')?;
        return (!port.contains(':')).then_some(host);
    }

    let (host, _port) = addr.rsplit_once(':')?;
    (!host.contains(':')).then_some(host)
}
