//! `segmenter`：把一个词切成音节路径。
//!
//! core 只定义接口；具体规则（前后缀、复合词、元音/辅音模式）在 `syllabist_separator`。

use crate::error::Result;

/// Segmenter：词 -> 有序音节段（`[prefix?, root..., suffix?]`，不含空段）。
pub trait Segmenter: Send + Sync {
    fn segment(&self, word: &str) -> Result<Vec<String>>;

    /// 用分隔符连接后的单行形式，例如 `gath;er`。
    fn segment_line(&self, word: &str, separator: char) -> Result<String> {
        let parts: Vec<String> = self.segment(word)?;
        let mut line = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                line.push(separator);
            }
            line.push_str(part);
        }
        Ok(line)
    }
}
