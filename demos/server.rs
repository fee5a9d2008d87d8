use http::StatusCode;
use http_reqmsg::{
    entity::PayloadKind,
    errors::RequestError,
    request::Request,
    server::{ServerCfg, TcpAcceptor},
    service::{ErrorCode, ServiceResult},
    service_fn, HttpResponse,
};
use std::io::Result;
use tracing::{instrument, warn};

#[instrument(skip(req), fields(id = %req.id(), path = req.path()))]
async fn handle(mut req: Request) -> ServiceResult {
    let cc = req.cache_control().copied().unwrap_or_default();
    let kind = match req.content_type() {
        Some(ct) if ct.starts_with("application/json") => PayloadKind::Json,
        Some(ct) if ct.starts_with("application/xml") => PayloadKind::Xml,
        _ => PayloadKind::Text,
    };

    let summary = match req.payload(kind).await {
        Ok(payload) => format!("{:?}", payload),
        Err(RequestError::PayloadDecoding(e)) => {
            warn!(err = %e, "bad payload");
            return Ok(HttpResponse::text(StatusCode::BAD_REQUEST, e));
        }
        Err(e) => {
            warn!(err = %e, "failed to read payload");
            return Err(ErrorCode(1));
        }
    };

    let body = format!(
        "{} {} HTTP/{}\nuser-agent: {}\nquery: {:?}\nno-cache: {}\npayload: {}\n",
        req.method(),
        req.raw_path(),
        req.http_version(),
        req.user_agent(),
        req.query_params(),
        cc.no_cache,
        summary,
    );
    Ok(HttpResponse::text(StatusCode::OK, body))
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let public = ServerCfg::builder()
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let strict = ServerCfg::builder()
        .max_uri_length(64)
        .max_header_size(1024)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let l1 = TcpAcceptor::bind(service_fn(public, handle), "127.0.0.1:8080").await?;
    let l2 = TcpAcceptor::bind(service_fn(strict, handle), "127.0.0.1:8081").await?;

    tokio::try_join!(l1.run(), l2.run())?;
    Ok(())
}
