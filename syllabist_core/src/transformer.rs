//! `transformer`：按分隔符切好的音节路径 -> 音节树（PathBuilder）。
//!
//! 输入与 `Separator` 的输出同格式：每行一个词，如 `wa;ter;borne`。
//! 产物与 `Expander` 相同：深度优先遍历任一根到 `Leaf`/combinator 的路径即一个完整词。
use std::io;
use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, error, info, trace, warn};

use crate::error::{Error, Result};
use crate::model::{Branch, Children, Collection, Node};
use crate::symbol::Symbol;

/// 默认分隔符。
pub const DEFAULT_SEPARATOR: char = ';';

pub struct Transformer<S> {
    lines: S,
    separator: char,
}

impl<S, L> Transformer<S>
where
    S: Stream<Item = io::Result<L>>,
    L: AsRef<str>,
{
    pub fn new(lines: S) -> Self {
        Self {
            lines,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// 覆盖默认的 `;` 分隔符。
    pub fn separator(mut self, separator: char) -> Result<Self> {
        self.separator = check_separator(separator)?;
        Ok(self)
    }

    pub async fn transform(self) -> Result<Collection> {
        info!(separator = %self.separator, "Starting transformer");
        let separator: char = self.separator;
        let mut lines = pin!(self.lines);
        let mut value = Collection::new();

        while let Some(line) = lines.next().await {
            let line = line.map_err(Error::from).inspect_err(|e| {
                error!(reason = %e, "Transform failed");
            })?;
            insert_line(&mut value, line.as_ref(), separator).inspect_err(|e| {
                error!(reason = %e, "Transform failed");
            })?;
        }

        info!(entries = value.len(), "Transform finished");
        Ok(value)
    }
}

/// 分隔符不能是 key 字符（`a-z`、`-`）或文法保留符号。
pub fn check_separator(separator: char) -> Result<char> {
    if separator.is_ascii_lowercase() || separator == '-' || Symbol::from_char(separator).is_some() {
        return Err(Error::MalformedInput(format!(
            "`{separator}` cannot be used as a separator"
        )));
    }
    Ok(separator)
}

/// 把一行路径并入集合。
pub fn insert_line(value: &mut Collection, line: &str, separator: char) -> Result<()> {
    if line.is_empty() {
        return Err(Error::MalformedInput("empty line".to_string()));
    }
    let keys: Vec<&str> = line.split(separator).filter(|k| !k.is_empty()).collect();
    match keys.len() {
        0 => {
            return Err(Error::MalformedInput(format!(
                "line `{line}` has no keys"
            )));
        }
        1 => warn!(line, "Line has only 1 part"),
        n => trace!(line, parts = n, "Starting iteration"),
    }
    insert(value.roots_mut(), &keys);
    debug!(line, "Inserted");
    Ok(())
}

/// 深度优先插入：`keys` 非空。
fn insert(children: &mut Children, keys: &[&str]) {
    let Some((&key, rest)) = keys.split_first() else {
        return;
    };

    if rest.is_empty() {
        match children.get_mut(key) {
            // 词在已有分支处结束：补上保留空 key 子节点
            Some(Node::Branch(branch)) => {
                if !branch.is_terminal() {
                    trace!(key, "Marking existing branch as combinator");
                    branch.set_terminal(true);
                }
            }
            Some(Node::Leaf) => {}
            None => {
                children.insert(key, Node::Leaf);
            }
        }
        return;
    }

    let node = children.get_or_insert_with(key, || Node::Branch(Branch::new()));
    if node.is_leaf() {
        trace!(key, "Found sibling of key, promoting leaf to combinator");
        *node = Node::Branch(Branch::combinator());
    }
    if let Node::Branch(branch) = node {
        insert(branch.children_mut(), rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{from_lines, text_lines};
    use pretty_assertions::assert_eq;

    async fn transform(text: &str) -> Collection {
        Transformer::new(text_lines(text)).transform().await.unwrap()
    }

    fn json(value: &Collection) -> String {
        serde_json::to_string(value).unwrap()
    }

    #[tokio::test]
    async fn single_syllable_group() {
        assert_eq!(json(&transform("a").await), r#"{"a":"a"}"#);
    }

    #[tokio::test]
    async fn adjacent_syllables() {
        let actual = transform("a;zal;ea\naard;vark").await;
        assert_eq!(
            json(&actual),
            r#"{"a":{"zal":{"ea":"ea"}},"aard":{"vark":"vark"}}"#
        );
    }

    #[tokio::test]
    async fn sibling_syllables() {
        let actual = transform("a;ble\na;bout").await;
        assert_eq!(json(&actual), r#"{"a":{"ble":"ble","bout":"bout"}}"#);
    }

    #[tokio::test]
    async fn combining_siblings() {
        let actual = transform("wa;ter\nwa;ter;borne").await;
        assert_eq!(json(&actual), r#"{"wa":{"ter":{"":"","borne":"borne"}}}"#);
    }

    #[tokio::test]
    async fn combining_within_siblings() {
        let actual = transform(
            "ac;com;pa;ni;ment\nac;com;pa;ny\nac;com;pa;ny;ing\nac;com;plice\nac;com;plish\nac;com;plish;ment",
        )
        .await;
        assert_eq!(
            json(&actual),
            r#"{"ac":{"com":{"pa":{"ni":{"ment":"ment"},"ny":{"":"","ing":"ing"}},"plice":"plice","plish":{"":"","ment":"ment"}}}}"#
        );
    }

    #[tokio::test]
    async fn promoted_leaf_keeps_every_remaining_key() {
        let actual = transform("a;ban\na;ban;don;ment").await;
        assert_eq!(
            json(&actual),
            r#"{"a":{"ban":{"":"","don":{"ment":"ment"}}}}"#
        );
    }

    #[tokio::test]
    async fn word_ending_at_existing_branch_becomes_combinator() {
        let actual = transform("wa;ter;borne\nwa;ter").await;
        assert_eq!(json(&actual), r#"{"wa":{"ter":{"":"","borne":"borne"}}}"#);
    }

    #[tokio::test]
    async fn grammar_symbol_separator_is_rejected() {
        for separator in ['|', '~', 'a', '-'] {
            let err = Transformer::new(text_lines("a|bout")).separator(separator).err();
            assert!(matches!(err, Some(Error::MalformedInput(_))));
        }
    }

    #[tokio::test]
    async fn custom_separator() {
        let actual = Transformer::new(text_lines("a+zal+ea\naard+vark"))
            .separator('+')
            .unwrap()
            .transform()
            .await
            .unwrap();
        assert_eq!(
            json(&actual),
            r#"{"a":{"zal":{"ea":"ea"}},"aard":{"vark":"vark"}}"#
        );
    }

    #[tokio::test]
    async fn empty_line_fails() {
        let err = Transformer::new(from_lines(["a;ble", ""]))
            .transform()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
