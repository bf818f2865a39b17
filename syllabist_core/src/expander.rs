//! `expander`：紧凑文法文本 -> 音节树（TreeDecoder）。
//!
//! 每行独立解码成一个 `Collection`，再按行序浅合并进结果：
//! 同名顶层 key 由后出现的行整体覆盖。
use std::io;
use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, error, info, trace};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::model::Collection;
use crate::symbol::Token;

pub struct Expander<S> {
    lines: S,
}

impl<S, L> Expander<S>
where
    S: Stream<Item = io::Result<L>>,
    L: AsRef<str>,
{
    pub fn new(lines: S) -> Self {
        Self { lines }
    }

    /// 消费全部行；任何一行失败或输入流出错，整次调用失败（不返回部分结果）。
    pub async fn expand(self) -> Result<Collection> {
        info!("Expanding");
        let mut lines = pin!(self.lines);
        let mut value = Collection::new();

        while let Some(line) = lines.next().await {
            let line = line.map_err(Error::from).inspect_err(|e| {
                error!(reason = %e, "Expand failed");
            })?;
            let line: &str = line.as_ref();
            debug!(line, "Starting iteration");

            let expanded = expand_line(line).inspect_err(|e| {
                error!(line, reason = %e, "Expand failed");
            })?;
            value.merge(expanded);
        }

        info!(entries = value.len(), "Expanded");
        Ok(value)
    }
}

/// 解码单行文法文本。空行是致命的 `MalformedInput`。
pub fn expand_line(line: &str) -> Result<Collection> {
    if line.is_empty() {
        return Err(Error::MalformedInput("empty line".to_string()));
    }

    let mut context = Context::default();
    let mut value = Collection::new();
    for (column, ch) in line.chars().enumerate() {
        let Some(token) = Token::classify(ch) else {
            trace!(char = %ch, column, "Unexpandable character");
            continue;
        };
        context.step(token, &mut value)?;
    }
    context.finish(&mut value)?;
    Ok(value)
}
