//! HTTP/1.x request messages for server-side handlers.
//!
//! A [`TcpAcceptor`](server::TcpAcceptor) enforces per-listener
//! [`Limits`](limits::Limits) on each request head, builds a
//! [`Request`](request::Request) and hands it to an
//! [`HttpService`](service::HttpService). The request owns one
//! [`Entity`](entity::Entity), whose body is decoded on demand as text, JSON,
//! XML, bytes, a byte stream or multipart body parts.

pub mod cache_control;
pub(crate) mod common;
#[cfg(not(fuzzing))]
pub(crate) mod decoder;
#[cfg(fuzzing)]
pub mod decoder;
pub mod entity;
pub mod errors;
pub mod header;
pub mod limits;
pub mod request;
pub mod server;
pub mod service;

pub use common::*;
