//! Terminal subcommands that read the store directly, without an MCP client.

pub mod search;
pub mod stats;

pub use search::search;
pub use stats::stats;
