//! `format`：把结构化文本规整成统一形式，便于比对（测试/工具用）。
use serde_json::Value;

use crate::error::{Error, Result};

/// 支持的规整格式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Standard {
    /// 重新输出为 2 空格缩进的 JSON（字段顺序不变）
    #[default]
    Json,
    /// 去掉首尾空白
    Text,
}

impl std::str::FromStr for Standard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Standard::Json),
            "text" => Ok(Standard::Text),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

pub fn standardise(data: &str, standard: Standard) -> Result<String> {
    if data.is_empty() {
        return Err(Error::MalformedInput("empty data".to_string()));
    }
    match standard {
        Standard::Json => {
            let value: Value = serde_json::from_str(data)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        Standard::Text => Ok(data.trim().to_string()),
    }
}
