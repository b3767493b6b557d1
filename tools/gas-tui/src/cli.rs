//! Command line surface.

use clap::Parser;

use crate::error::DashboardError;

/// Live gas and block-time dashboard for a node's newHeads subscription
#[derive(Parser, Debug)]
#[command(name = "gas-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Node endpoint: ws:// or wss:// URL, ipc:// URL, or an IPC socket path
    pub endpoint: Option<String>,

    /// Further arguments are accepted and ignored
    #[arg(hide = true, num_args = 0..)]
    pub ignored: Vec<String>,
}

impl Args {
    /// The endpoint, or the usage error naming `program`.
    pub fn require_endpoint(&self, program: &str) -> Result<&str, DashboardError> {
        self.endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| DashboardError::Usage {
                program: program.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_endpoint_is_usage_error() {
        let args = Args::try_parse_from(["gas-tui"]).unwrap();
        let err = args.require_endpoint("gas-tui").unwrap_err();
        assert!(matches!(err, DashboardError::Usage { .. }));
        assert_eq!(err.to_string(), "usage: gas-tui /path/to/socket");
    }

    #[test]
    fn test_positional_endpoint() {
        let args = Args::try_parse_from(["gas-tui", "/tmp/geth.ipc"]).unwrap();
        assert_eq!(args.require_endpoint("gas-tui").unwrap(), "/tmp/geth.ipc");
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let args = Args::try_parse_from(["gas-tui", "/tmp/geth.ipc", "extra", "more"]).unwrap();
        assert_eq!(args.require_endpoint("gas-tui").unwrap(), "/tmp/geth.ipc");
        assert_eq!(args.ignored, vec!["extra", "more"]);
    }
}
