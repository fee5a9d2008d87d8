use crate::{
    request::Request,
    server::ServerCfg,
    service::{HttpService, ServiceResult},
};
use std::{future::Future, sync::Arc};

/// Adapts an async closure into an [`HttpService`].
pub struct ServiceFn<H, HF>
where
    HF: Future<Output = ServiceResult> + Send,
    H: Clone + FnMut(Request) -> HF,
{
    cfg: Arc<ServerCfg>,
    handle: H,
}

impl<H, HF> HttpService for ServiceFn<H, HF>
where
    HF: Future<Output = ServiceResult> + Send,
    H: Clone + FnMut(Request) -> HF,
{
    type F = HF;

    #[inline]
    fn server_cfg(&self) -> Arc<ServerCfg> {
        self.cfg.clone()
    }

    #[inline]
    fn handle(&mut self, req: Request) -> Self::F {
        (self.handle)(req)
    }
}

impl<H, HF> Clone for ServiceFn<H, HF>
where
    HF: Future<Output = ServiceResult> + Send,
    H: Clone + FnMut(Request) -> HF,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            cfg: self.cfg.clone(),
            handle: self.handle.clone(),
        }
    }
}

#[inline]
pub fn service_fn<H, HF>(cfg: Arc<ServerCfg>, handle: H) -> ServiceFn<H, HF>
where
    HF: Future<Output = ServiceResult> + Send,
    H: Clone + FnMut(Request) -> HF,
{
    ServiceFn { cfg, handle }
}
