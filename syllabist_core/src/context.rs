//! `Context`：文法解码时逐字符推进的唯一状态。
//!
//! 约定：
//! - `key`：正在累积的当前 key
//! - `path`：从集合根到当前插入点的祖先 key 序列
//! - 每行开始时重建；行内字符只会同步修改这里和本行的 `Collection`
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{Branch, Collection, Node};
use crate::symbol::{Symbol, Token};

/// 插入点要写入的节点类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    /// 只含保留空 key 子节点的 Branch（`~`）
    Empty,
    /// 空 Branch（`>`）
    Group,
    /// Leaf
    Value,
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    /// 当前 key 缓冲
    pub key: String,
    /// 祖先路径栈
    pub path: Vec<String>,
}

impl Context {
    /// 处理一个已分类的字符。
    pub fn step(&mut self, token: Token, value: &mut Collection) -> Result<()> {
        match token {
            Token::Char(ch) => {
                (&mut self.key).push(ch);
                Ok(())
            }
            Token::Symbol(symbol @ (Symbol::Combinator | Symbol::Concatenator)) => {
                if self.key.is_empty() {
                    return Err(Error::MalformedInput(format!(
                        "relation marker `{}` without a key",
                        symbol.as_char()
                    )));
                }
                let kind = if symbol == Symbol::Combinator {
                    Insert::Empty
                } else {
                    Insert::Group
                };
                self.insert(kind, value)?;
                let key = std::mem::take(&mut self.key);
                (&mut self.path).push(key);
                debug!(path = ?self.path, "Pushed key onto stack");
                Ok(())
            }
            Token::Symbol(Symbol::GroupStart) => Ok(()),
            Token::Symbol(Symbol::GroupEnd) => {
                self.insert(Insert::Value, value)?;
                self.key.clear();
                (&mut self.path).pop();
                debug!(path = ?self.path, "Popped from stack");
                Ok(())
            }
            Token::Symbol(Symbol::Sibling) => {
                self.insert(Insert::Value, value)?;
                self.key.clear();
                Ok(())
            }
        }
    }

    /// 行结束：残留的 key 是本行最后一个未闭合的 Leaf。
    pub fn finish(self, value: &mut Collection) -> Result<()> {
        self.insert(Insert::Value, value)
    }

    fn insert(&self, kind: Insert, value: &mut Collection) -> Result<()> {
        if self.key.is_empty() {
            trace!(?kind, "Inserting without key");
            return Ok(());
        }
        let target = value.children_at_mut(&self.path)?;
        let node = match kind {
            Insert::Empty => Node::Branch(Branch::combinator()),
            Insert::Group => Node::Branch(Branch::new()),
            Insert::Value => Node::Leaf,
        };
        target.insert(self.key.as_str(), node);
        trace!(?kind, key = %self.key, depth = self.path.len(), "Inserted");
        Ok(())
    }
}
