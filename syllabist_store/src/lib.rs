//! `syllabist_store`：词表制品的获取与存放（文件/网络 I/O 都在这一层）。
//!
//! - `updater`：拉取远端词表，按 SHA-256 摘要落盘
//! - `manifest`：记录当前与历史制品
//! - `calendar`：过期判断用到的日期运算
pub mod calendar;
pub mod error;
pub mod manifest;
pub mod updater;

pub use error::{Error, Result};
pub use manifest::Manifest;
pub use updater::{DEFAULT_SOURCE, Fetch, HttpFetcher, Report, Updater, UpdaterConfig};
