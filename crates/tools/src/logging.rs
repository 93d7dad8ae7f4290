use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never interleave with the battle narrative on stdout.
/// `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: Level) {
    let filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
