use thiserror::Error;

/// Application level failure code, answered with `500 Internal Server Error`.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[error("error code: {0:#X}")]
pub struct ErrorCode(pub u16);

impl From<u16> for ErrorCode {
    #[inline]
    fn from(ec: u16) -> Self {
        Self(ec)
    }
}
