//! `model`：音节树（syllable tree）数据模型。
//!
//! 约定：
//! - `Leaf` 的值恒等于它在父节点里的 key，所以 `Leaf` 本身不带数据
//! - `Branch` 的保留空 key 子节点（`"": ""`）用 `terminal` 标记表示：
//!   有标记 = combinator（在此结束，也可继续）；无标记 = concatenator（只能继续）
//! - 子节点顺序即插入顺序，决定序列化顺序与“最后一个兄弟”的判定
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Branch 的关系类型；每次编码时由 `terminal` 现算，不单独存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Combinator,
    Concatenator,
}

/// 有序的 key -> 节点映射（插入顺序有语义）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    entries: Vec<(String, Node)>,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        let i = self.position(key)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// 插入或覆盖；覆盖时保留原位置（与对象字段赋值一致）。
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        let key: String = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// 取已有节点，不存在时用 `make` 创建并追加到末尾。
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> Node) -> &mut Node {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_owned(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Children {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut children = Children::new();
        for (key, node) in iter {
            children.insert(key, node);
        }
        children
    }
}

/// 音节树节点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// 终端音节，值即 key
    Leaf,
    Branch(Branch),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf)
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf => None,
        }
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

/// 中间节点：有序子节点 + 可选的保留空 key 子节点（`terminal`）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    terminal: bool,
    children: Children,
}

impl Branch {
    /// 空的 concatenator（构建过程中会再补子节点）。
    pub fn new() -> Self {
        Self::default()
    }

    /// 只含保留空 key 子节点的 combinator。
    pub fn combinator() -> Self {
        Self {
            terminal: true,
            children: Children::new(),
        }
    }

    pub fn with_children(terminal: bool, children: Children) -> Self {
        Self { terminal, children }
    }

    /// 是否带保留空 key 子节点（单词在此处也可结束）。
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    pub fn relation(&self) -> Relation {
        if self.terminal {
            Relation::Combinator
        } else {
            Relation::Concatenator
        }
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }
}

/// 顶层集合：首段 key -> 节点，encoder/decoder 之间交换的就是它。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    roots: Children,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.roots.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.roots.insert(key, node)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.roots.iter()
    }

    pub fn roots(&self) -> &Children {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Children {
        &mut self.roots
    }

    /// 行级合并：同名顶层 key 由后者整体覆盖，不做深合并。
    pub fn merge(&mut self, other: Collection) {
        for (key, node) in other.roots.entries {
            self.roots.insert(key, node);
        }
    }

    /// 从根沿 `path` 逐级下探，返回插入点的子节点表。
    ///
    /// 路径上任一 key 缺失或是 `Leaf` 都是 `StructuralMismatch`。
    pub fn children_at_mut(&mut self, path: &[String]) -> Result<&mut Children> {
        let mut target: &mut Children = &mut self.roots;
        for (depth, key) in path.iter().enumerate() {
            target = match target.get_mut(key) {
                Some(Node::Branch(branch)) => branch.children_mut(),
                Some(Node::Leaf) => {
                    return Err(Error::StructuralMismatch(format!(
                        "`{key}` at depth {depth} is a leaf, expected a branch"
                    )));
                }
                None => {
                    return Err(Error::StructuralMismatch(format!(
                        "no entry `{key}` at depth {depth}"
                    )));
                }
            };
        }
        Ok(target)
    }
}

impl FromIterator<(String, Node)> for Collection {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

/// JSON 视图：`Leaf` 输出为 `"key": "key"`，`terminal` 输出为首个 `"": ""`。
struct ChildrenView<'a> {
    terminal: bool,
    children: &'a Children,
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + usize::from(self.terminal)))?;
        if self.terminal {
            map.serialize_entry("", "")?;
        }
        for (key, node) in self.children.iter() {
            match node {
                Node::Leaf => map.serialize_entry(key, key)?,
                Node::Branch(branch) => map.serialize_entry(key, branch)?,
            }
        }
        map.end()
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ChildrenView {
            terminal: self.terminal,
            children: &self.children,
        }
        .serialize(serializer)
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ChildrenView {
            terminal: false,
            children: &self.roots,
        }
        .serialize(serializer)
    }
}
