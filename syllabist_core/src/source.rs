//! `source`：构造逐行的异步输入流（纯内存，不做 I/O）。
use std::io;

use futures::stream::{self, Stream};

/// 把一段文本按行切成 `Stream<Item = io::Result<&str>>`。
pub fn text_lines(text: &str) -> impl Stream<Item = io::Result<&str>> + '_ {
    stream::iter(text.lines().map(Ok))
}

/// 同上，但接收已拆好的行。
pub fn from_lines<I>(lines: I) -> impl Stream<Item = io::Result<I::Item>>
where
    I: IntoIterator,
{
    stream::iter(lines.into_iter().map(Ok))
}
