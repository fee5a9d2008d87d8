use crate::{limits::Limits, server::ServerCfgBuilder};

pub(crate) const DEFAULT_SERVER_NAME: &str = env!("DEFAULT_SERVER_NAME");

/// Per-listener configuration, shared by every connection of one
/// [`TcpAcceptor`](crate::server::TcpAcceptor).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ServerCfg {
    pub(crate) limits: Limits,
    pub(crate) server_name: String,
}

impl ServerCfg {
    #[inline]
    pub fn builder() -> ServerCfgBuilder {
        ServerCfgBuilder::default()
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    #[inline]
    pub fn max_uri_length(&self) -> usize {
        self.limits.max_uri_length
    }

    #[inline]
    pub fn max_header_size(&self) -> usize {
        self.limits.max_header_size
    }

    /// Value of the `Server` header added to responses.
    #[inline]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            server_name: DEFAULT_SERVER_NAME.to_owned(),
        }
    }
}
