use crate::errors::BadMutualTlsStatusError;
use std::fmt::{Display, Formatter};

static STATUS_NAME: [&str; 3] = ["passed", "failed", "none"];

/// Outcome of the client-certificate handshake, as reported by the transport.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[non_exhaustive]
pub enum MutualTlsStatus {
    Passed = 0,
    Failed = 1,
    #[default]
    None = 2,
}

impl MutualTlsStatus {
    #[inline]
    pub fn as_str(self) -> &'static str {
        STATUS_NAME[self as usize]
    }

    #[inline]
    pub fn is_passed(self) -> bool {
        self == Self::Passed
    }

    #[inline]
    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl std::str::FromStr for MutualTlsStatus {
    type Err = BadMutualTlsStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "none" => Ok(Self::None),
            _ => Err(BadMutualTlsStatusError),
        }
    }
}

impl Display for MutualTlsStatus {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Mutual TLS handshake record handed over by the transport boundary.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MutualTls {
    pub status: MutualTlsStatus,
    /// Base64 encoded peer certificate, when one was presented.
    pub peer_certificate: Option<String>,
}

impl MutualTls {
    #[inline]
    pub fn new(status: MutualTlsStatus) -> Self {
        Self {
            status,
            peer_certificate: None,
        }
    }

    #[inline]
    pub fn with_peer_certificate(mut self, cert: impl Into<String>) -> Self {
        self.peer_certificate = Some(cert.into());
        self
    }
}
