//! customerdb - customer records over a JSON API
//!
//! A document store of [`model::Customer`] records behind an axum HTTP
//! server. The store is chosen by configuration and injected into the
//! handlers as a [`store::SharedStore`].

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{Config, StorageConfig};
pub use http_server::{HttpServer, HttpServerConfig};
pub use model::{Customer, CustomerId, CustomerPatch, NewCustomer};
pub use store::{CustomerStore, FileStore, MemoryStore, SharedStore, StoreError, StoreResult};
