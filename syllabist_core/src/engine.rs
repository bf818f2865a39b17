use std::io;
use std::pin::pin;

use futures::{Stream, StreamExt};
use tracing::{debug, error, info};

use crate::compressor::Compressor;
use crate::error::{Error, Result};
use crate::expander::Expander;
use crate::model::Collection;
use crate::segmenter::Segmenter;
use crate::transformer::{self, DEFAULT_SEPARATOR, Transformer};

/// 引擎：把各阶段串成流水线。
///
/// - segmenter（切分）-> 分隔符路径 -> transformer（建树）-> compressor（编码）
/// - expander 是 compressor 的逆过程，独立使用
pub struct Engine<S> {
    /// 词 -> 音节段
    segmenter: S,
    /// 路径分隔符（separate 输出 / transform 输入）
    separator: char,
}

impl<S> Engine<S>
where
    S: Segmenter,
{
    pub fn new(segmenter: S) -> Self {
        Self {
            segmenter,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// 设置路径分隔符；文法保留符号和 key 字符是 `MalformedInput`。
    pub fn separator(mut self, separator: char) -> Result<Self> {
        self.separator = transformer::check_separator(separator)?;
        Ok(self)
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// 每个输入词输出一行分隔符路径，行间 `\n`。
    pub async fn separate<W, L>(&self, words: W) -> Result<String>
    where
        W: Stream<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        info!("Separating");
        let mut words = pin!(words);
        let mut value: Vec<String> = Vec::new();

        while let Some(word) = words.next().await {
            let word = word.map_err(Error::from).inspect_err(|e| {
                error!(reason = %e, "Separate failed");
            })?;
            let word: &str = word.as_ref();
            let line = self
                .segmenter
                .segment_line(word, self.separator)
                .inspect_err(|e| error!(word, reason = %e, "Separate failed"))?;
            debug!(word, line = %line, "Inserting result");
            value.push(line);
        }

        info!(words = value.len(), "Separated");
        Ok(value.join("\n"))
    }

    pub async fn transform<P, L>(&self, paths: P) -> Result<Collection>
    where
        P: Stream<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        Transformer::new(paths).separator(self.separator)?.transform().await
    }

    pub fn compress(&self, data: &Collection) -> String {
        Compressor::new(data).compress()
    }

    pub async fn expand<G, L>(&self, grammar: G) -> Result<Collection>
    where
        G: Stream<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        Expander::new(grammar).expand().await
    }

    /// 完整流水线：词 -> 音节树 -> 文法文本。
    pub async fn syllabify<W, L>(&self, words: W) -> Result<String>
    where
        W: Stream<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        Ok(self.compress(&self.build(words).await?))
    }

    /// 词 -> 音节树（不经过中间文本）。
    pub async fn build<W, L>(&self, words: W) -> Result<Collection>
    where
        W: Stream<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        info!("Building");
        let mut words = pin!(words);
        let mut value = Collection::new();

        while let Some(word) = words.next().await {
            let word = word.map_err(Error::from).inspect_err(|e| {
                error!(reason = %e, "Build failed");
            })?;
            let line: String = self
                .segmenter
                .segment_line(word.as_ref(), self.separator)
                .inspect_err(|e| error!(reason = %e, "Build failed"))?;
            transformer::insert_line(&mut value, &line, self.separator)?;
        }

        info!(entries = value.len(), "Built");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::text_lines;
    use pretty_assertions::assert_eq;

    /// 按 `.` 切分的假 segmenter。
    struct Dotted;

    impl Segmenter for Dotted {
        fn segment(&self, word: &str) -> Result<Vec<String>> {
            if word.is_empty() {
                return Err(Error::MalformedInput("empty word".to_string()));
            }
            Ok(word.split('.').map(str::to_string).collect())
        }
    }

    #[tokio::test]
    async fn separate_joins_segments() {
        let engine = Engine::new(Dotted);
        let out = engine.separate(text_lines("wa.ter\nwa.ter.borne")).await.unwrap();
        assert_eq!(out, "wa;ter\nwa;ter;borne");
    }

    #[tokio::test]
    async fn syllabify_runs_full_pipeline() {
        let engine = Engine::new(Dotted);
        let out = engine
            .syllabify(text_lines("wa.ter\nwa.ter.borne\na.bout\na.ble"))
            .await
            .unwrap();
        assert_eq!(out, "wa>[ter~[borne]]\na>[bout|ble]");
    }

    #[tokio::test]
    async fn grammar_separator_is_rejected() {
        let err = Engine::new(Dotted).separator('|').err();
        assert!(matches!(err, Some(Error::MalformedInput(_))));
    }

    #[tokio::test]
    async fn expand_inverts_compress() {
        let engine = Engine::new(Dotted).separator('+').unwrap();
        let built = engine.build(text_lines("ac.com.plish\nac.com.plish.ment\nac.com.plice")).await.unwrap();
        let text = engine.compress(&built);
        let expanded = engine.expand(text_lines(&text)).await.unwrap();
        assert_eq!(expanded, built);
    }
}
