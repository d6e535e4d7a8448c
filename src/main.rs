use anyhow::{Context, Result};
use csvframe::{load_csv, LoadConfig};
use std::{env, io::Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) config: optional YAML path as first arg ──────────────────
    let config = match env::args().nth(1) {
        Some(cfg_path) => LoadConfig::from_yaml_file(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path))?,
        None => LoadConfig::default(),
    };
    info!(path = %config.path.display(), delimiter = ?config.delimiter, strictness = ?config.strictness, "config");

    // ─── 3) load ─────────────────────────────────────────────────────
    let table = load_csv(&config)
        .with_context(|| format!("loading {}", config.path.display()))?;
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        header = ?table.header(),
        "table ready"
    );

    // ─── 4) emit as JSON on stdout ───────────────────────────────────
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &table).context("writing table as JSON")?;
    writeln!(out)?;
    Ok(())
}
