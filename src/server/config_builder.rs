use crate::{
    errors::ConfigError,
    limits::Limits,
    server::{config::DEFAULT_SERVER_NAME, ServerCfg},
};
use std::sync::Arc;

#[derive(Debug)]
pub struct ServerCfgBuilder {
    limits: Limits,
    server_name: String,
}

impl Default for ServerCfgBuilder {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            server_name: DEFAULT_SERVER_NAME.to_owned(),
        }
    }
}

impl ServerCfgBuilder {
    #[inline]
    pub fn max_uri_length(mut self, max_uri_length: usize) -> Self {
        self.limits.max_uri_length = max_uri_length;
        self
    }

    #[inline]
    pub fn max_header_size(mut self, max_header_size: usize) -> Self {
        self.limits.max_header_size = max_header_size;
        self
    }

    #[inline]
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = server_name.into();
        self
    }

    pub fn build(self) -> Result<Arc<ServerCfg>, ConfigError> {
        if self.limits.max_uri_length == 0 {
            return Err(ConfigError::ZeroLimit("max_uri_length"));
        }
        if self.limits.max_header_size == 0 {
            return Err(ConfigError::ZeroLimit("max_header_size"));
        }
        Ok(Arc::new(ServerCfg {
            limits: self.limits,
            server_name: self.server_name,
        }))
    }
}
