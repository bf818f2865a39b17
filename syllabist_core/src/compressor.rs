//! `compressor`：音节树 -> 紧凑文法文本（TreeEncoder）。
//!
//! 规则：
//! - `Leaf` 只输出 key
//! - `Branch` 输出 `key` + 关系符（`~`/`>`）+ `[` + 子节点（`|` 分隔，最后一个后面不加）+ `]`
//! - 保留空 key 子节点本身不输出，也不参与“最后一个兄弟”的判定
use tracing::{debug, error, info};

use crate::error::Result;
use crate::model::{Collection, Node};
use crate::symbol::Symbol;

/// 纯变换：不做 I/O，不修改输入树。
pub struct Compressor<'a> {
    data: &'a Collection,
}

impl<'a> Compressor<'a> {
    pub fn new(data: &'a Collection) -> Self {
        Self { data }
    }

    /// 每个顶层条目一行，行间用 `\n` 连接。
    pub fn compress(&self) -> String {
        info!(entries = self.data.len(), "Compressing");
        let lines: Vec<String> = self
            .data
            .iter()
            .map(|(key, node)| {
                let mut line = String::new();
                render(key, node, &mut line);
                debug!(key, line = %line, "Compressed entry");
                line
            })
            .collect();
        lines.join("\n")
    }

    /// 外部 JSON 文本的入口：无法表示的值被跳过，`null` 直接失败。
    pub fn compress_json(text: &str) -> Result<String> {
        let data = Collection::from_json_str(text).inspect_err(|e| {
            error!(reason = %e, "Compress failed");
        })?;
        Ok(Compressor::new(&data).compress())
    }
}

fn render(key: &str, node: &Node, out: &mut String) {
    out.push_str(key);
    let Node::Branch(branch) = node else {
        return;
    };
    out.push(Symbol::from(branch.relation()).as_char());
    out.push(Symbol::GroupStart.as_char());
    for (i, (child, node)) in branch.children().iter().enumerate() {
        if i > 0 {
            out.push(Symbol::Sibling.as_char());
        }
        render(child, node, out);
    }
    out.push(Symbol::GroupEnd.as_char());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn compress(json: &str) -> String {
        Compressor::compress_json(json).unwrap()
    }

    #[test]
    fn single_syllable() {
        assert_eq!(compress(r#"{"a": "a"}"#), "a");
    }

    #[test]
    fn concatenated_syllables() {
        assert_eq!(compress(r#"{"a": {"bout": "bout"}}"#), "a>[bout]");
    }

    #[test]
    fn sibling_syllables() {
        assert_eq!(compress(r#"{"a": {"ble": "ble", "bout": "bout"}}"#), "a>[ble|bout]");
    }

    #[test]
    fn combining_syllables() {
        assert_eq!(
            compress(r#"{"wa": {"ter": {"": "", "borne": "borne"}}}"#),
            "wa>[ter~[borne]]"
        );
    }

    #[test]
    fn terminal_marker_position_does_not_add_separators() {
        assert_eq!(
            compress(r#"{"a": {"ban": {"don": {"ment": "ment", "": ""}, "doned": "doned"}}}"#),
            "a>[ban>[don~[ment]|doned]]"
        );
    }

    #[test]
    fn multiple_lines() {
        let json = r#"{
            "a": {"bout": "bout"},
            "ac": {"com": {
                "pa": {"ni": {"ment": "ment"}, "ny": {"": "", "ing": "ing"}},
                "plice": "plice",
                "plish": {"": "", "ment": "ment"}
            }}
        }"#;
        assert_eq!(
            compress(json),
            "a>[bout]\nac>[com>[pa>[ni>[ment]|ny~[ing]]|plice|plish~[ment]]]"
        );
    }

    #[test]
    fn ignores_unrepresentable_values() {
        assert_eq!(compress(r#"{"a": {"bout": -1, "back": "back"}}"#), "a>[back]");
    }

    #[test]
    fn null_value_fails() {
        let err = Compressor::compress_json(r#"{"": null}"#).unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch(_)));
    }

    #[test]
    fn sibling_count_is_children_minus_one() {
        let json = r#"{"x": {"": "", "a": "a", "b": "b", "c": {"d": "d"}}}"#;
        let out = compress(json);
        assert_eq!(out, "x~[a|b|c>[d]]");
        assert_eq!(out.matches('|').count(), 2);
    }
}
