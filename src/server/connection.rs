use crate::{
    common::{HttpResponse, Id},
    decoder::{decode_content_length, decode_request_head},
    entity::Body,
    errors::{ConnectionError, DecoderError},
    header::HeaderTable,
    limits::{scan_head, HeadStatus},
    request::Request,
    server::ServerCfg,
    service::HttpService,
};
use bytes::{Buf, Bytes, BytesMut};
use http::{StatusCode, Version};
use std::{fmt::Write, sync::Arc};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::{debug, error, instrument, trace, warn};

pub(crate) const RBUF_CAP: usize = 8 * 1024;
const WBUF_CAP: usize = 512;

const CONNECTION: &str = "Connection";
const CONTENT_LENGTH: &str = "Content-Length";
const EXPECT: &str = "Expect";
const SERVER: &str = "Server";

const CONTINUE_100: &[u8] = b"HTTP/1.1 100 Continue\r\n\r\n";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ProcessingDecision {
    KeepAlive,
    Shutdown,
}

type ConnectionResult = Result<ProcessingDecision, ConnectionError>;

#[derive(Debug)]
pub(crate) struct Connection<S> {
    pub id: Id,
    sock: TcpStream,
    rbuf: BytesMut,
    wbuf: BytesMut,
    cfg: Arc<ServerCfg>,
    svc: S,
    msgs_cnt: usize,
}

impl<S> Connection<S>
where
    S: HttpService,
    <S as HttpService>::F: Send,
{
    pub fn new(id: Id, sock: TcpStream, svc: S) -> Self {
        Connection {
            id,
            sock,
            rbuf: BytesMut::with_capacity(RBUF_CAP),
            wbuf: BytesMut::with_capacity(WBUF_CAP),
            cfg: svc.server_cfg(),
            svc,
            msgs_cnt: 0,
        }
    }

    #[instrument(name = "connection", skip(self), fields(id = %self.id))]
    pub async fn process(&mut self) {
        if self.sock.set_nodelay(true).is_err() {
            error!("failed to set TCP_NODELAY");
        }

        loop {
            self.msgs_cnt += 1;
            match self.process_message().await {
                Ok(ProcessingDecision::KeepAlive) => continue,
                Ok(ProcessingDecision::Shutdown) => break,
                Err(e) => {
                    error!(err=%e, "process_message exited with error");
                    break;
                }
            }
        }
        trace!("shutting down connection");
        if let Err(e) = self.sock.shutdown().await {
            warn!(err=%e, "socket.shutdown failed");
        }
    }

    #[instrument(name = "message", skip(self), fields(n = self.msgs_cnt), err)]
    async fn process_message(&mut self) -> ConnectionResult {
        let head_len = match self.recv_head().await {
            Ok(Some(n)) => n,
            Ok(None) => return Ok(ProcessingDecision::Shutdown),
            Err(ConnectionError::Limit(v)) => {
                debug!(violation = %v, "rejecting request head");
                return self.send_status(v.status()).await;
            }
            Err(e) => return Err(e),
        };

        let head = match decode_request_head(&self.rbuf[..head_len]) {
            Ok(Some((_, head))) => head,
            Ok(None) => {
                error!("request head is incomplete after scanning");
                return self.send_status(StatusCode::BAD_REQUEST).await;
            }
            Err(e) => {
                warn!(err = %e, "failed to decode request head");
                return self.send_status(StatusCode::BAD_REQUEST).await;
            }
        };
        self.rbuf.advance(head_len);

        let body_len = match decode_content_length(&head.headers) {
            Ok(len) => len.unwrap_or(0),
            Err(e @ DecoderError::UnsupportedTransferEncoding(_)) => {
                warn!(err = %e, "rejecting request body");
                return self.send_status(StatusCode::NOT_IMPLEMENTED).await;
            }
            Err(e) => {
                warn!(err = %e, "failed to decode body length");
                return self.send_status(StatusCode::BAD_REQUEST).await;
            }
        };

        let version = head.version;
        let keep_alive = is_keep_alive(version, &head.headers);

        if body_len > self.rbuf.len() && expects_continue(&head.headers) {
            trace!("sending interim 100 Continue");
            self.sock.write_all(CONTINUE_100).await?;
        }

        let body = match self.recv_body(body_len).await? {
            Some(b) if b.is_empty() => Body::Empty,
            Some(b) => Body::Bytes(b),
            None => return Ok(ProcessingDecision::Shutdown),
        };

        let req = Request::new(head, body);
        debug!(req_id = %req.id(), method = %req.method(), target = req.raw_path(), "request");

        let resp = match self.svc.handle(req).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(err = %e, "handle failed");
                return self.send_status(StatusCode::INTERNAL_SERVER_ERROR).await;
            }
        };

        self.send_response(version, resp, keep_alive).await
    }

    /// Receives until a complete head is buffered, checking the listener
    /// limits on every read. `Ok(None)` means the peer went away.
    async fn recv_head(&mut self) -> Result<Option<usize>, ConnectionError> {
        loop {
            if let HeadStatus::Complete(n) = scan_head(&self.rbuf, self.cfg.limits())? {
                return Ok(Some(n));
            }
            if self.recv().await? == 0 {
                if !self.rbuf.is_empty() {
                    debug!(buffered = self.rbuf.len(), "connection closed within request head");
                }
                return Ok(None);
            }
        }
    }

    async fn recv_body(&mut self, len: usize) -> Result<Option<Bytes>, ConnectionError> {
        while self.rbuf.len() < len {
            if self.recv().await? == 0 {
                debug!(missing = len - self.rbuf.len(), "connection closed within body");
                return Ok(None);
            }
        }
        Ok(Some(self.rbuf.split_to(len).freeze()))
    }

    async fn recv(&mut self) -> Result<usize, ConnectionError> {
        if self.rbuf.capacity() - self.rbuf.len() < 1024 {
            self.rbuf.reserve(RBUF_CAP);
        }
        let n = self.sock.read_buf(&mut self.rbuf).await?;
        trace!("received {} bytes", n);
        Ok(n)
    }

    async fn send_response(
        &mut self,
        version: Version,
        mut resp: HttpResponse,
        keep_alive: bool,
    ) -> ConnectionResult {
        if !resp.headers.contains(CONTENT_LENGTH) {
            let len = cds::aformat!(24, "{}", resp.body.len())?;
            resp.headers.set(CONTENT_LENGTH, len.as_str());
        }
        if !resp.headers.contains(SERVER) {
            resp.headers.set(SERVER, self.cfg.server_name());
        }
        if !keep_alive {
            resp.headers.set(CONNECTION, "close");
        }

        self.wbuf.clear();
        write!(self.wbuf, "{:?} {}\r\n", version, resp.status)?;
        resp.headers.encode(&mut self.wbuf);
        self.wbuf.extend_from_slice(b"\r\n");
        self.wbuf.extend_from_slice(&resp.body);
        self.sock.write_all(&self.wbuf).await?;

        Ok(if keep_alive {
            ProcessingDecision::KeepAlive
        } else {
            ProcessingDecision::Shutdown
        })
    }

    #[instrument(skip(self))]
    async fn send_status(&mut self, status: StatusCode) -> ConnectionResult {
        debug_assert!(status.is_client_error() || status.is_server_error());
        self.wbuf.clear();
        write!(self.wbuf, "{:?} {}\r\n", Version::HTTP_11, status)?;
        write!(self.wbuf, "{}: {}\r\n", SERVER, self.cfg.server_name())?;
        write!(self.wbuf, "{}: 0\r\n", CONTENT_LENGTH)?;
        write!(self.wbuf, "{}: close\r\n", CONNECTION)?;
        write!(self.wbuf, "\r\n")?;
        self.sock.write_all(&self.wbuf).await?;
        Ok(ProcessingDecision::Shutdown)
    }
}

fn is_keep_alive(version: Version, headers: &HeaderTable) -> bool {
    version == Version::HTTP_11
        && !headers
            .get_all(CONNECTION)
            .into_iter()
            .flat_map(|v| v.split(','))
            .any(|t| t.trim().eq_ignore_ascii_case("close"))
}

fn expects_continue(headers: &HeaderTable) -> bool {
    headers
        .get(EXPECT)
        .map_or(false, |v| v.eq_ignore_ascii_case("100-continue"))
}
