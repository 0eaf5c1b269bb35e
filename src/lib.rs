pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServerConfig;
pub use config::TomlConfig;

pub use core::{
    client::{GraphQlClient, SchemaTransport},
    controller::PageController,
    schema::{build_schema, EstadosSchema},
    server::{build_router, serve},
    upstream::RestEstadosSource,
    view::BufferedView,
};
pub use domain::model::{Estado, SelectOutcome};
pub use utils::error::{EstadosError, Result};
