use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 远端返回非 2xx；reason 优先取响应体，否则取状态描述
    #[error("fetch failed ({status}): {reason}")]
    Fetch { status: u16, reason: String },

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
