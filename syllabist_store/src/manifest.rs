//! `manifest`：词表制品的清单文件。
//!
//! 格式（JSON）：
//!
//! ```text
//! {
//!   "latest": { "created": "...", "digest": "<sha256>" },
//!   "<旧 digest>": { "created": "...", "obsoleted": "..." }
//! }
//! ```
//!
//! 约定：
//! - 每个 digest 对应制品目录下的 `<digest>.txt`
//! - 首次运行时 `latest` 可以是 `{}`；清单文件不存在时视为空清单
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::Calendar;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// 被替换下来的旧制品。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obsolete {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    pub obsoleted: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub latest: Latest,
    /// digest -> 旧制品
    #[serde(flatten)]
    pub previous: BTreeMap<String, Obsolete>,
}

impl Manifest {
    pub async fn read(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Manifest missing, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self)?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    pub fn is_current(&self, digest: &str) -> bool {
        self.latest.digest.as_deref() == Some(digest)
    }

    /// 记录新的 latest；原 latest（若有 digest）移入旧制品，`obsoleted = now`。
    pub fn promote(&mut self, digest: String, now: DateTime<Utc>) {
        let previous = std::mem::replace(
            &mut self.latest,
            Latest {
                created: Some(now),
                digest: Some(digest),
            },
        );
        if let Some(old) = previous.digest {
            self.previous.insert(
                old,
                Obsolete {
                    created: previous.created,
                    obsoleted: now,
                },
            );
        }
    }

    /// 移除 `obsoleted` 早于 `cutoff` 的旧制品，返回被移除的 digest。
    pub fn prune(&mut self, cutoff: DateTime<Utc>) -> Result<Vec<String>> {
        let mut removed: Vec<String> = Vec::new();
        for (digest, entry) in &self.previous {
            if Calendar::new(entry.obsoleted).is(None, Some(cutoff))? {
                removed.push(digest.clone());
            }
        }
        for digest in &removed {
            self.previous.remove(digest);
        }
        Ok(removed)
    }
}
