//! `updater`：拉取远端词表，按内容摘要落盘并维护清单。
//!
//! 流程：fetch -> sha256 -> 读清单 -> (摘要变化时) 写制品 + 更新清单 -> 清理过期制品。
//!
//! 约定：
//! - 制品文件名是内容摘要（`<digest>.txt`），相同内容只存一份
//! - 清理总会执行，即使源未变化
//! - 删除过期制品失败只记 `warn!`，不影响结果
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};

use crate::calendar::Calendar;
use crate::error::{Error, Result};
use crate::manifest::Manifest;

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterConfig {
    /// 制品目录
    pub artifacts: PathBuf,
    /// 清单文件名（位于制品目录内）
    pub manifest: String,
    /// 旧制品保留天数
    pub lifetime: i64,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            artifacts: PathBuf::from("artifacts"),
            manifest: "manifest.json".to_string(),
            lifetime: 90,
        }
    }
}

impl UpdaterConfig {
    pub fn manifest_path(&self) -> PathBuf {
        self.artifacts.join(&self.manifest)
    }

    pub fn artifact_path(&self, digest: &str) -> PathBuf {
        self.artifacts.join(format!("{digest}.txt"))
    }
}

/// 取回源文本。
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        debug!(source, "Fetching");
        let response = self.client.get(source).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let reason = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            body
        };
        Err(Error::Fetch {
            status: status.as_u16(),
            reason,
        })
    }
}

/// SHA-256，小写十六进制。
pub fn digest(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// 一次更新的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub digest: String,
    /// 源内容是否与清单中的 latest 不同
    pub changed: bool,
    /// 被清理掉的旧 digest
    pub pruned: Vec<String>,
}

pub struct Updater<F> {
    fetcher: F,
    config: UpdaterConfig,
}

impl<F> Updater<F>
where
    F: Fetch,
{
    pub fn new(fetcher: F, config: UpdaterConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    pub async fn update(&self, source: &str) -> Result<Report> {
        self.update_at(source, Utc::now()).await
    }

    /// 以 `now` 作为当前时间执行一次更新。
    pub async fn update_at(&self, source: &str, now: DateTime<Utc>) -> Result<Report> {
        info!(source, "Updating");
        self.run(source, now)
            .await
            .inspect(|report| info!(digest = %report.digest, changed = report.changed, "Finished"))
            .inspect_err(|e| error!(reason = %e, "Update failed"))
    }

    async fn run(&self, source: &str, now: DateTime<Utc>) -> Result<Report> {
        let data: String = self.fetcher.fetch(source).await?;
        let digest = digest(&data);
        debug!(digest = %digest, "Calculated digest");

        tokio::fs::create_dir_all(&self.config.artifacts).await?;
        let path = self.config.manifest_path();
        let mut manifest = Manifest::read(&path).await?;

        let changed = !manifest.is_current(&digest);
        if changed {
            info!("Source changed");
            tokio::fs::write(self.config.artifact_path(&digest), &data).await?;
            manifest.promote(digest.clone(), now);
            manifest.write(&path).await?;
        } else {
            info!("Source is unchanged");
        }

        let pruned = self.prune(&mut manifest, now).await?;
        Ok(Report {
            digest,
            changed,
            pruned,
        })
    }

    async fn prune(&self, manifest: &mut Manifest, now: DateTime<Utc>) -> Result<Vec<String>> {
        let cutoff = Calendar::new(now).subtract(self.config.lifetime);
        debug!(cutoff = %cutoff, "Pruning manifest");

        let removed = manifest.prune(cutoff)?;
        manifest.write(&self.config.manifest_path()).await?;

        for digest in &removed {
            if let Err(e) = tokio::fs::remove_file(self.config.artifact_path(digest)).await {
                warn!(file = %digest, reason = %e, "Failed to remove file");
            }
        }
        Ok(removed)
    }
}
