//! 英语单词的音节切分：前后缀剥离 + 词根的元音/辅音形状切分。
//!
//! 约定：
//! - 输入先转小写；空词是错误
//! - 前缀/后缀各自从两端同步向内扫描，只保留最长的已登记匹配，两者不重叠
//! - 剩余的词根交给 `matcher` 递归切分
//! - 输出顺序：`[prefix?, root 各段..., suffix?]`，不含空段

pub mod constants;
pub mod matcher;
pub mod patterns;

use syllabist_core::error::{Error, Result};
use syllabist_core::segmenter::Segmenter;
use tracing::debug;

use crate::constants::{PREFIXES, SUFFIXES};

/// 剥离结果；三段拼起来等于原词。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affixes<'a> {
    pub prefix: &'a str,
    pub root: &'a str,
    pub suffix: &'a str,
}

pub struct Separator {
    /// 不超过这个字符数的词根不再切分
    min_length: usize,
    /// 前后游标允许交叠的字符数
    overlap: usize,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            min_length: 3,
            overlap: 1,
        }
    }
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// 前后缀扫描。第 `f` 步同时测试长度为 `f` 的前缀和长度为 `f` 的后缀。
    pub fn affixes<'a>(&self, word: &'a str) -> Affixes<'a> {
        // 字符边界（含末尾），非 ASCII 输入也能安全切片
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let len = bounds.len() - 1;

        let mut prefix_end = 0usize;
        let mut suffix_start = len;
        let mut front = 1usize;
        let mut back = len.saturating_sub(1);

        while front < len && back > 0 && front <= back + self.overlap {
            if front <= suffix_start {
                let candidate = &word[..bounds[front]];
                if PREFIXES.contains(&candidate) {
                    debug!(word, prefix = candidate, "New prefix identified");
                    prefix_end = front;
                }
            }
            if back >= prefix_end {
                let candidate = &word[bounds[back]..];
                if SUFFIXES.contains(&candidate) {
                    debug!(word, suffix = candidate, "New suffix identified");
                    suffix_start = back;
                }
            }
            front += 1;
            back -= 1;
        }

        Affixes {
            prefix: &word[..bounds[prefix_end]],
            root: &word[bounds[prefix_end]..bounds[suffix_start]],
            suffix: &word[bounds[suffix_start]..],
        }
    }
}

impl Segmenter for Separator {
    fn segment(&self, word: &str) -> Result<Vec<String>> {
        if word.is_empty() {
            return Err(Error::MalformedInput("empty word".to_string()));
        }
        let word = word.to_lowercase();
        let affixes = self.affixes(&word);

        let mut out: Vec<String> = Vec::new();
        if !affixes.prefix.is_empty() {
            out.push(affixes.prefix.to_string());
        }
        out.extend(matcher::split(affixes.root, self.min_length));
        if !affixes.suffix.is_empty() {
            out.push(affixes.suffix.to_string());
        }

        debug!(word = %word, segments = out.len(), "Word separated");
        Ok(out)
    }
}
