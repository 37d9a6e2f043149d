//! Plugin handshake with the host process.
//!
//! The host starts this binary with a magic cookie in the environment and reads a single
//! line from stdout telling it where the gRPC server listens.
use std::{fmt, net::SocketAddr};

/// Environment variable the host sets before starting the plugin.
pub const MAGIC_COOKIE_KEY: &str = "SHOES_PLUGIN_MAGIC_COOKIE";

/// Expected value of [`MAGIC_COOKIE_KEY`].
pub const MAGIC_COOKIE_VALUE: &str = "are_you_a_shoes?";

/// Plugin framework protocol version.
pub const CORE_PROTOCOL_VERSION: u32 = 1;

/// Version of the `Shoes` service contract.
pub const APP_PROTOCOL_VERSION: u32 = 1;

/// Returns `true` when the process was started by a plugin host.
pub fn cookie_matches(value: Option<&str>) -> bool {
    value == Some(MAGIC_COOKIE_VALUE)
}

/// The line announcing the listening address, without the trailing newline.
#[derive(Debug, Clone, Copy)]
pub struct HandshakeLine {
    pub addr: SocketAddr,
}

impl fmt::Display for HandshakeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|tcp|{}|grpc",
            CORE_PROTOCOL_VERSION, APP_PROTOCOL_VERSION, self.addr
        )
    }
}
