//! `syllabist_core`：纯逻辑层，不做文件/网络 I/O。
//!
//! 设计目标：
//! - **三种等价表示互转**：分隔符路径（`transformer`）、音节树（`model`）、紧凑文法（`compressor`/`expander`）
//! - **往返律**：任一合法音节树 `T` 满足 `expand(compress(T)) == T`
//! - **切分可替换**：`segmenter::Segmenter` 只是接口，规则实现在 `syllabist_separator`
//!
//! 所有流式入口都接收 `Stream<Item = io::Result<L>>`，按行顺序处理；输入流出错即整体失败。
pub mod compressor;
pub mod context;
pub mod engine;
pub mod error;
pub mod expander;
pub mod format;
pub mod json;
pub mod model;
pub mod segmenter;
pub mod source;
pub mod symbol;
pub mod transformer;

pub use error::{Error, Result};
pub use model::{Branch, Children, Collection, Node, Relation};
