use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use syllabist_store::manifest::{Latest, Obsolete};
use syllabist_store::{Error, Fetch, Manifest, Result, Updater, UpdaterConfig};
use tempfile::TempDir;

const SUCCESS: &str = "aee408847d35e44e99430f0979c3357b85fe8dbb4535a494301198adbee85f27";
const PREVIOUS: &str = "aee408847d35e44e99430f0979c3357b85fe8dbb4535a494301198adbee85f26";

/// 固定返回同一段文本，或固定失败。
struct FakeFetcher {
    body: Option<&'static str>,
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, _source: &str) -> Result<String> {
        match self.body {
            Some(body) => Ok(body.to_string()),
            None => Err(Error::Fetch {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn updater(dir: &TempDir, body: Option<&'static str>) -> Updater<FakeFetcher> {
    let config = UpdaterConfig {
        artifacts: dir.path().to_path_buf(),
        ..UpdaterConfig::default()
    };
    Updater::new(FakeFetcher { body }, config)
}

async fn seed(dir: &TempDir, manifest: &Manifest) {
    manifest
        .write(&dir.path().join("manifest.json"))
        .await
        .unwrap();
}

async fn read(dir: &TempDir) -> Manifest {
    Manifest::read(&dir.path().join("manifest.json")).await.unwrap()
}

#[tokio::test]
async fn first_run_writes_artifact_and_manifest() {
    let dir = TempDir::new().unwrap();
    let report = updater(&dir, Some("success"))
        .update_at("source", date(1970, 1, 1))
        .await
        .unwrap();

    assert!(report.changed);
    assert_eq!(report.digest, SUCCESS);
    let artifact = std::fs::read_to_string(dir.path().join(format!("{SUCCESS}.txt"))).unwrap();
    assert_eq!(artifact, "success");

    let raw = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    assert_eq!(
        raw,
        format!(r#"{{"latest":{{"created":"1970-01-01T00:00:00Z","digest":"{SUCCESS}"}}}}"#)
    );
}

#[tokio::test]
async fn changed_source_obsoletes_previous_latest() {
    let dir = TempDir::new().unwrap();
    seed(
        &dir,
        &Manifest {
            latest: Latest {
                created: Some(date(1970, 1, 1)),
                digest: Some(PREVIOUS.to_string()),
            },
            ..Manifest::default()
        },
    )
    .await;

    let report = updater(&dir, Some("success"))
        .update_at("source", date(1970, 3, 1))
        .await
        .unwrap();
    assert!(report.changed);
    assert!(report.pruned.is_empty());

    let manifest = read(&dir).await;
    assert!(manifest.is_current(SUCCESS));
    assert_eq!(
        manifest.previous.get(PREVIOUS),
        Some(&Obsolete {
            created: Some(date(1970, 1, 1)),
            obsoleted: date(1970, 3, 1),
        })
    );
}

#[tokio::test]
async fn unchanged_source_writes_no_artifact() {
    let dir = TempDir::new().unwrap();
    let mut manifest = Manifest::default();
    manifest.promote(SUCCESS.to_string(), date(1970, 1, 1));
    seed(&dir, &manifest).await;

    let report = updater(&dir, Some("success"))
        .update_at("source", date(1970, 3, 1))
        .await
        .unwrap();

    assert!(!report.changed);
    assert!(!dir.path().join(format!("{SUCCESS}.txt")).exists());
    assert_eq!(read(&dir).await, manifest);
}

#[tokio::test]
async fn expired_artifacts_are_pruned() {
    let dir = TempDir::new().unwrap();
    let mut manifest = Manifest::default();
    manifest.promote(SUCCESS.to_string(), date(2000, 1, 1));
    manifest.previous.insert(
        "expired".to_string(),
        Obsolete {
            created: None,
            obsoleted: date(2000, 1, 1),
        },
    );
    manifest.previous.insert(
        "missing".to_string(),
        Obsolete {
            created: None,
            obsoleted: date(2000, 1, 2),
        },
    );
    manifest.previous.insert(
        "recent".to_string(),
        Obsolete {
            created: None,
            obsoleted: date(2000, 5, 1),
        },
    );
    seed(&dir, &manifest).await;
    std::fs::write(dir.path().join("expired.txt"), "old").unwrap();
    std::fs::write(dir.path().join("recent.txt"), "newer").unwrap();

    // `missing.txt` 不存在：删除失败只告警
    let report = updater(&dir, Some("success"))
        .update_at("source", date(2000, 6, 1))
        .await
        .unwrap();

    assert_eq!(report.pruned, vec!["expired".to_string(), "missing".to_string()]);
    assert!(!dir.path().join("expired.txt").exists());
    assert!(dir.path().join("recent.txt").exists());

    let manifest = read(&dir).await;
    assert_eq!(manifest.previous.keys().collect::<Vec<_>>(), vec!["recent"]);
}

#[tokio::test]
async fn fetch_failure_leaves_manifest_untouched() {
    let dir = TempDir::new().unwrap();
    let err = updater(&dir, None)
        .update_at("source", date(1970, 1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fetch { status: 404, .. }));
    assert!(!dir.path().join("manifest.json").exists());
}
