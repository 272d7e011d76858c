/// HTTP middleware utilities for paradise-service
///
/// There is no token auth here: the author identity is the caller's network
/// origin, the same way the one-post and one-like rules are keyed.
use actix_web::{error::ErrorBadRequest, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::net::SocketAddr;

/// Caller identity extracted from the connection info. Behind the reverse
/// proxy this is the realip (Forwarded / X-Forwarded-For), otherwise the
/// peer address with the port stripped.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl FromRequest for ClientIp {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let addr = req
            .connection_info()
            .realip_remote_addr()
            .map(host_only);

        ready(addr.map(ClientIp).ok_or_else(|| {
            ErrorBadRequest("client address unavailable")
        }))
    }
}

/// Peer addresses arrive as `ip:port`; forwarded addresses come bare.
fn host_only(addr: &str) -> String {
    match addr.parse::<SocketAddr>() {
        Ok(sock) => sock.ip().to_string(),
        Err(_) => addr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_port_from_peer_address() {
        assert_eq!(host_only("203.0.113.7:51844"), "203.0.113.7");
        assert_eq!(host_only("[2001:db8::1]:443"), "2001:db8::1");
    }

    #[test]
    fn keeps_bare_addresses() {
        assert_eq!(host_only("203.0.113.7"), "203.0.113.7");
        assert_eq!(host_only("2001:db8::1"), "2001:db8::1");
    }
}
