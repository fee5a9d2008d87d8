use crate::{common::HttpResponse, request::Request, server::ServerCfg};
use std::{future::Future, sync::Arc};

mod error_code;
pub use error_code::*;

pub type ServiceResult = Result<HttpResponse, ErrorCode>;

/// Application entry point invoked once per accepted request.
pub trait HttpService: Clone {
    type F: Future<Output = ServiceResult>;

    /// Configuration of the listener this service is bound to.
    fn server_cfg(&self) -> Arc<ServerCfg>;

    fn handle(&mut self, req: Request) -> Self::F;
}
