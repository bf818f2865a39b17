//! `syllabist`：命令行入口。
//!
//! ```bash
//! # 词 -> 分隔符路径
//! printf 'gather\ncandle\n' | syllabist separate
//!
//! # 分隔符路径 -> 音节树 JSON
//! syllabist --input paths.txt transform --separator ';'
//!
//! # 音节树 JSON <-> 文法
//! syllabist --input tree.json compress
//! syllabist --input grammar.txt expand
//!
//! # 完整流水线：词 -> 文法
//! syllabist --input words.txt --output grammar.txt syllabify
//!
//! # 更新远端词表
//! syllabist update --artifacts artifacts --lifetime 90
//! ```
//!
//! 逐行输入默认读 stdin，输出默认写 stdout；日志写 stderr。
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::stream::{BoxStream, StreamExt};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use syllabist_core::Collection;
use syllabist_core::compressor::Compressor;
use syllabist_core::engine::Engine;
use syllabist_core::format::{Standard, standardise};
use syllabist_separator::Separator;
use syllabist_store::{DEFAULT_SOURCE, HttpFetcher, Updater, UpdaterConfig};

#[derive(Parser)]
#[command(name = "syllabist")]
#[command(version)]
#[command(about = "Syllable separation and compact syllable-tree grammar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, e.g. `info` or `syllabist_core=debug`
    #[arg(long, env = "LEVEL", default_value = "info", global = true)]
    level: String,

    /// Input file (reads stdin if not provided)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output file (writes stdout if not provided)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split each word into syllables, one delimited line per word
    Separate {
        #[arg(long, default_value_t = ';')]
        separator: char,
    },

    /// Build a syllable tree (JSON) from delimited lines
    Transform {
        #[arg(long, default_value_t = ';')]
        separator: char,
    },

    /// Encode a syllable tree (JSON) as grammar text
    Compress,

    /// Decode grammar text into a syllable tree (JSON)
    Expand,

    /// Words straight to grammar text
    Syllabify,

    /// Re-render JSON or trim text
    Format {
        /// json or text
        #[arg(long, default_value = "json")]
        standard: Standard,
    },

    /// Fetch the remote word list and maintain the artifact manifest
    Update {
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: String,

        #[arg(long, env = "ARTIFACTS", default_value = "artifacts")]
        artifacts: PathBuf,

        #[arg(long, env = "MANIFEST", default_value = "manifest.json")]
        manifest: String,

        /// Days an obsoleted artifact is kept
        #[arg(long, env = "LIFETIME", default_value_t = 90)]
        lifetime: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(reason = %format!("{e:#}"), "Failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let input = cli.input.as_deref();
    let output = cli.output.as_deref();
    let engine = Engine::new(Separator::new());

    match cli.command {
        Commands::Separate { separator } => {
            let engine = engine.separator(separator)?;
            let text = engine.separate(lines(input).await?).await?;
            write_output(output, &text).await
        }
        Commands::Transform { separator } => {
            let engine = engine.separator(separator)?;
            let tree: Collection = engine.transform(lines(input).await?).await?;
            write_output(output, &tree.to_json_pretty()?).await
        }
        Commands::Compress => {
            let data = read_text(input).await?;
            let text = Compressor::compress_json(&data)?;
            write_output(output, &text).await
        }
        Commands::Expand => {
            let tree: Collection = engine.expand(lines(input).await?).await?;
            write_output(output, &tree.to_json_pretty()?).await
        }
        Commands::Syllabify => {
            let text = engine.syllabify(lines(input).await?).await?;
            write_output(output, &text).await
        }
        Commands::Format { standard } => {
            let data = read_text(input).await?;
            write_output(output, &standardise(&data, standard)?).await
        }
        Commands::Update {
            source,
            artifacts,
            manifest,
            lifetime,
        } => {
            let config = UpdaterConfig {
                artifacts,
                manifest,
                lifetime,
            };
            let report = Updater::new(HttpFetcher::new(), config).update(&source).await?;
            info!(
                digest = %report.digest,
                changed = report.changed,
                pruned = report.pruned.len(),
                "Update complete"
            );
            write_output(output, &report.digest).await
        }
    }
}

/// 逐行输入流：文件或 stdin。
async fn lines(input: Option<&Path>) -> anyhow::Result<BoxStream<'static, io::Result<String>>> {
    match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("open {}", path.display()))?;
            Ok(LinesStream::new(BufReader::new(file).lines()).boxed())
        }
        None => Ok(LinesStream::new(BufReader::new(tokio::io::stdin()).lines()).boxed()),
    }
}

async fn read_text(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read {}", path.display())),
        None => {
            let mut data = String::new();
            tokio::io::stdin()
                .read_to_string(&mut data)
                .await
                .context("read stdin")?;
            Ok(data)
        }
    }
}

async fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, format!("{text}\n"))
            .await
            .with_context(|| format!("write {}", path.display())),
        None => {
            let mut out = tokio::io::stdout();
            out.write_all(text.as_bytes()).await?;
            out.write_all(b"\n").await?;
            out.flush().await?;
            Ok(())
        }
    }
}
