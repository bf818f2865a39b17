//! `error`：core 层统一错误类型。
//!
//! 约定：
//! - 这里只放**致命**错误：出现即中止本次 encode/decode/segment 调用
//! - 可恢复情况（无法表示的 JSON 值、单段路径行）只记 `warn!`；未识别字符静默丢弃，不进入这里
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// 需要非空输入的地方拿到了空词/空行
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// 需要按 Branch 索引的值缺失或不是 Branch
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    /// 调用方提供的行流失败
    #[error("line source failed: {0}")]
    Source(#[from] io::Error),

    /// 外部 JSON 无法解析
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
