use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::Extensions;
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

/// Address of the connected peer, as recorded in access logs.
///
/// Taken from the socket, never from forwarding headers. Falls back to
/// `unknown` when the server was not started with connect info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    pub fn from_extensions(extensions: &Extensions) -> Self {
        match extensions.get::<ConnectInfo<SocketAddr>>() {
            Some(ConnectInfo(addr)) => ClientAddr(addr.ip().to_string()),
            None => ClientAddr("unknown".to_string()),
        }
    }
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientAddr::from_extensions(&parts.extensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_peer_ip_from_connect_info() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 51234))));
        assert_eq!(ClientAddr::from_extensions(&extensions).0, "192.168.1.7");
    }

    #[test]
    fn missing_connect_info_is_unknown() {
        assert_eq!(ClientAddr::from_extensions(&Extensions::new()).0, "unknown");
    }
}
