//! `symbol`：紧凑文法里的保留符号与逐字符分类。
//!
//! 文法（每个顶层 key 一行）：
//! - `Node := Key | Key Relation '[' Children ']'`
//! - `Relation := '>' (concatenator) | '~' (combinator)`
//! - `Children := Node ('|' Node)*`
//! - `Key := [a-z-]+`
use crate::model::Relation;

/// 文法保留符号。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `~`：在此结束，也可继续
    Combinator,
    /// `>`：只能继续
    Concatenator,
    /// `[`
    GroupStart,
    /// `]`
    GroupEnd,
    /// `|`
    Sibling,
}

impl Symbol {
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Combinator => '~',
            Symbol::Concatenator => '>',
            Symbol::GroupStart => '[',
            Symbol::GroupEnd => ']',
            Symbol::Sibling => '|',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '~' => Some(Symbol::Combinator),
            '>' => Some(Symbol::Concatenator),
            '[' => Some(Symbol::GroupStart),
            ']' => Some(Symbol::GroupEnd),
            '|' => Some(Symbol::Sibling),
            _ => None,
        }
    }
}

impl From<Relation> for Symbol {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Combinator => Symbol::Combinator,
            Relation::Concatenator => Symbol::Concatenator,
        }
    }
}

/// decoder 看到的一个输入字符（字符集外的字符不产生 token）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// key 字符：`a-z` 或 `-`
    Char(char),
    Symbol(Symbol),
}

impl Token {
    /// 字符集：`[a-z\-~>\[\]|]`；其余返回 `None`（调用方静默丢弃）。
    pub fn classify(ch: char) -> Option<Self> {
        if ch.is_ascii_lowercase() || ch == '-' {
            return Some(Token::Char(ch));
        }
        Symbol::from_char(ch).map(Token::Symbol)
    }
}
