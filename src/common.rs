mod http_response;
mod id;
mod mutual_tls;
mod request_head;
mod service_fn;

pub use http_response::*;
pub use id::*;
pub use mutual_tls::*;
pub use request_head::*;
pub use service_fn::*;
