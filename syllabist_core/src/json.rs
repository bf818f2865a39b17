//! `json`：外部 JSON 与音节树之间的桥接。
//!
//! 约定：
//! - 字符串 -> `Leaf`；对象 -> `Branch`；`"": ""` -> 保留 combinator 标记
//! - `null` 出现在任何需要对象的位置都是致命的 `StructuralMismatch`
//! - 数字/布尔/数组无法表示：记 `warn!` 并跳过该条目，继续处理其余条目
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Branch, Children, Collection, Node};

impl Collection {
    /// 把 JSON 文本解析成顶层集合（对象字段顺序保持不变）。
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_json(&value)
    }

    /// 2 空格缩进的 JSON 文本；空集合输出 `{}`。
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::StructuralMismatch(format!(
                "expected an object at the top level, found {}",
                kind(value)
            )));
        };

        let mut collection = Collection::new();
        for (key, value) in map {
            if key.is_empty() {
                if value.is_null() {
                    return Err(null_at(key));
                }
                warn!(key = %key, kind = kind(value), "Skipping empty top-level key");
                continue;
            }
            if let Some(node) = node_from_json(key, value)? {
                collection.insert(key.as_str(), node);
            }
        }
        Ok(collection)
    }
}

fn node_from_json(key: &str, value: &Value) -> Result<Option<Node>> {
    match value {
        Value::String(s) => {
            if s != key {
                debug!(key, value = %s, "Leaf value differs from key, using key");
            }
            Ok(Some(Node::Leaf))
        }
        Value::Object(map) => Ok(Some(Node::Branch(branch_from_json(key, map)?))),
        Value::Null => Err(null_at(key)),
        other => {
            warn!(key, kind = kind(other), "Identified uncompressable value");
            Ok(None)
        }
    }
}

fn branch_from_json(key: &str, map: &Map<String, Value>) -> Result<Branch> {
    let mut terminal = false;
    let mut children = Children::new();
    for (child, value) in map {
        if child.is_empty() {
            match value {
                Value::String(_) => terminal = true,
                Value::Null => return Err(null_at(key)),
                other => warn!(parent = key, kind = kind(other), "Skipping non-string terminal marker"),
            }
            continue;
        }
        if let Some(node) = node_from_json(child, value)? {
            children.insert(child.as_str(), node);
        }
    }
    Ok(Branch::with_children(terminal, children))
}

fn null_at(key: &str) -> Error {
    Error::StructuralMismatch(format!("value of `{key}` is null, expected an object or string"))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_value_is_structural_mismatch() {
        let err = Collection::from_json_str(r#"{"": null}"#).unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch(_)));

        let err = Collection::from_json_str(r#"{"a": {"bout": null}}"#).unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch(_)));
    }

    #[test]
    fn numeric_values_are_skipped() {
        let collection = Collection::from_json_str(r#"{"a": {"bout": -1, "back": "back"}}"#).unwrap();
        let a = collection.get("a").and_then(Node::as_branch).unwrap();
        assert_eq!(a.children().keys().collect::<Vec<_>>(), vec!["back"]);
    }

    #[test]
    fn keeps_field_order_and_terminal_marker() {
        let text = r#"{"wa":{"ter":{"":"","borne":"borne"}},"a":{"ble":"ble","bout":"bout"}}"#;
        let collection = Collection::from_json_str(text).unwrap();

        assert_eq!(collection.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["wa", "a"]);
        assert_eq!(serde_json::to_string(&collection).unwrap(), text);
    }

    #[test]
    fn pretty_output_is_indented() {
        let collection = Collection::from_json_str(r#"{"a":{"":"","bout":"bout"}}"#).unwrap();
        let expected = "{\n  \"a\": {\n    \"\": \"\",\n    \"bout\": \"bout\"\n  }\n}";
        assert_eq!(collection.to_json_pretty().unwrap(), expected);
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = Collection::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::StructuralMismatch(_)));
    }
}
