//! Node endpoint parsing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::DashboardError;

/// Transport used to reach the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// JSON-RPC over WebSocket.
    WebSocket(String),
    /// JSON-RPC over a Unix domain socket.
    Ipc(PathBuf),
}

impl FromStr for Endpoint {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DashboardError::setup(s, "empty endpoint"));
        }

        if s.starts_with("ws://") || s.starts_with("wss://") {
            return Ok(Self::WebSocket(s.to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Err(DashboardError::setup(
                s,
                "HTTP endpoints cannot carry subscriptions, use ws:// or an IPC path",
            ));
        }
        if let Some(path) = s.strip_prefix("ipc://") {
            return Ok(Self::Ipc(PathBuf::from(path)));
        }
        Ok(Self::Ipc(PathBuf::from(s)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebSocket(url) => f.write_str(url),
            Self::Ipc(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_websocket() {
        assert_eq!(
            "ws://localhost:8546".parse::<Endpoint>().unwrap(),
            Endpoint::WebSocket("ws://localhost:8546".to_string())
        );
        assert!(matches!(
            "wss://node.example.com/ws".parse::<Endpoint>().unwrap(),
            Endpoint::WebSocket(_)
        ));
    }

    #[test]
    fn test_parse_ipc() {
        assert_eq!(
            "/home/eth/.ethereum/geth.ipc".parse::<Endpoint>().unwrap(),
            Endpoint::Ipc(PathBuf::from("/home/eth/.ethereum/geth.ipc"))
        );
        assert_eq!(
            "ipc:///tmp/geth.ipc".parse::<Endpoint>().unwrap(),
            Endpoint::Ipc(PathBuf::from("/tmp/geth.ipc"))
        );
    }

    #[test]
    fn test_rejects_http_and_empty() {
        let err = "http://localhost:8545".parse::<Endpoint>().unwrap_err();
        assert!(matches!(err, DashboardError::Setup { .. }));
        assert!("https://localhost:8545".parse::<Endpoint>().is_err());
        assert!("  ".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_any_other_value_is_socket_path() {
        assert_eq!(
            "unix://tmp/geth.ipc".parse::<Endpoint>().unwrap(),
            Endpoint::Ipc(PathBuf::from("unix://tmp/geth.ipc"))
        );
        assert_eq!(
            "geth.ipc".parse::<Endpoint>().unwrap(),
            Endpoint::Ipc(PathBuf::from("geth.ipc"))
        );
    }

    #[test]
    fn test_display_round_trips_input() {
        let endpoint: Endpoint = "ws://127.0.0.1:8546".parse().unwrap();
        assert_eq!(endpoint.to_string(), "ws://127.0.0.1:8546");
    }
}
