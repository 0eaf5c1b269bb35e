pub mod client;
pub mod controller;
pub mod schema;
pub mod server;
pub mod upstream;
pub mod view;

pub use crate::domain::model::{Estado, SelectOutcome};
pub use crate::domain::ports::{ConfigProvider, EstadosSource, EstadosView, GraphQlTransport};
pub use crate::utils::error::Result;
