#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "http://localhost:3000/estados";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4000";
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

#[cfg(feature = "cli")]
pub use cli::ServerConfig;
pub use toml_config::TomlConfig;
