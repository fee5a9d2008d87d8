use crate::{common::CONN_ID, server::Connection, service::HttpService};
use std::{io::Result, net::SocketAddr};
use tokio::{
    net::{TcpListener, ToSocketAddrs},
    task,
};
use tracing::{debug, instrument, trace};

/// Accepts connections on one listening socket and serves each with a clone
/// of its service. Limits come from that service's
/// [`server_cfg`](HttpService::server_cfg), so every acceptor may run with
/// its own.
#[derive(Debug)]
pub struct TcpAcceptor<S>
where
    S: HttpService + Send + 'static,
    <S as HttpService>::F: Send,
{
    sock: TcpListener,
    local_addr: SocketAddr,
    svc: S,
}

impl<S> TcpAcceptor<S>
where
    S: HttpService + Send + 'static,
    <S as HttpService>::F: Send,
{
    pub async fn bind<A: ToSocketAddrs>(svc: S, addr: A) -> Result<Self> {
        let sock = TcpListener::bind(addr).await?;
        let local_addr = sock.local_addr()?;
        Ok(Self {
            sock,
            local_addr,
            svc,
        })
    }

    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    #[instrument(name = "tcp_acceptor", skip(self), fields(addr=%self.local_addr))]
    pub async fn run(&self) -> Result<()> {
        let cfg = self.svc.server_cfg();
        trace!(
            max_uri_length = cfg.max_uri_length(),
            max_header_size = cfg.max_header_size(),
            "start..."
        );
        loop {
            let (sock, addr) = self.sock.accept().await?;
            let conn_id = CONN_ID.next();
            let svc = self.svc.clone();
            debug!(addr = %addr, id=%conn_id, "accepted new connection");

            task::spawn(async move {
                let mut conn = Connection::new(conn_id, sock, svc);
                conn.process().await;
                trace!(id=%conn.id, "connection terminated");
            });
        }
    }
}
