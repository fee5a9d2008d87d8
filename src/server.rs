mod connection;
pub(crate) use connection::Connection;

mod config;
mod config_builder;
mod tcp_acceptor;

pub use config::ServerCfg;
pub use config_builder::*;
pub use tcp_acceptor::*;
