mod exporter;
mod receiver;
mod telemetry;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Parser, Subcommand};
use skyingest_core::config::Config;
use skyingest_core::topic::TopicKind;
use skyingest_store::Store;

use crate::exporter::Exporter;
use crate::telemetry::{LogFormat, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "skyingest")]
#[command(about = "Convert SkyWalking segments and JVM metrics into flat log records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Run the bus bridge and write converted records")]
    Run {
        #[arg(long)]
        db_path: Option<PathBuf>,
        #[arg(long)]
        http_addr: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        #[arg(long)]
        trace_instance: Option<String>,
    },
    #[command(about = "Convert one raw payload offline and print its records")]
    Convert {
        #[arg(long, help = "segment, metric or logging")]
        kind: String,
        #[arg(long, help = "Payload file holds base64 text, as printed in decode warnings")]
        base64: bool,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(LogFormat::from_env());

    match cli.command {
        Commands::Run {
            db_path,
            http_addr,
            namespace,
            trace_instance,
        } => run_server(db_path, http_addr, namespace, trace_instance).await,
        Commands::Convert { kind, base64, file } => run_convert(&kind, base64, file),
    }
}

async fn run_server(
    db_path: Option<PathBuf>,
    http_addr: Option<String>,
    namespace: Option<String>,
    trace_instance: Option<String>,
) -> anyhow::Result<()> {
    let mut cfg = Config::load().context("load config")?;
    if let Some(v) = db_path {
        cfg.db_path = v;
    }
    if let Some(v) = http_addr {
        cfg.http_addr = v;
    }
    if let Some(v) = namespace {
        cfg.namespace = Some(v).filter(|ns| !ns.is_empty());
    }
    if let Some(v) = trace_instance {
        cfg.trace_instance = v;
    }
    cfg.validate()?;

    let store = Store::open(&cfg.db_path)?;
    let topics = cfg.topics();
    let exporter = Exporter::new(store, &cfg);

    eprintln!("skyingest run");
    eprintln!("  db: {}", cfg.db_path.display());
    eprintln!("  http: {}", cfg.http_addr);
    eprintln!("  topics: {}", topics.all().join(", "));
    eprintln!(
        "  logstores: {}, {}",
        cfg.trace_logstore(),
        cfg.metric_logstore()
    );

    let addr: SocketAddr = cfg
        .http_addr
        .parse()
        .with_context(|| format!("bad http addr {}", cfg.http_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    let app = receiver::router(topics, exporter);

    let server_task = tokio::spawn(async move { axum::serve(listener, app).await });

    tokio::select! {
        res = server_task => {
            res??;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl-c, shutting down");
        }
    }

    Ok(())
}

fn run_convert(kind: &str, encoded: bool, file: PathBuf) -> anyhow::Result<()> {
    let topic_kind = TopicKind::parse(kind);
    if topic_kind == TopicKind::Unclassified {
        anyhow::bail!("unknown kind {kind}; expected segment, metric or logging");
    }

    let raw = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
    let payload = if encoded {
        let text = String::from_utf8_lossy(&raw);
        BASE64
            .decode(text.trim())
            .context("payload is not valid base64")?
    } else {
        raw
    };

    let batch = skyingest_convert::convert(topic_kind, Some(payload.as_slice()))?;
    for record in &batch.records {
        println!("{}", serde_json::to_string(record)?);
    }
    eprintln!(
        "-- {} records ({}) --",
        batch.len(),
        batch.category.as_str()
    );
    Ok(())
}
