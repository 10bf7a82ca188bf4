//! Refresh command implementation.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::aggregator::{dedupe, sorted_full, tail};
use crate::config::Config;
use crate::decoder::decode_payload;
use crate::fetcher::Fetcher;
use crate::parser::extract_entries;
use crate::utils::{format_bytes, format_count, sanitize_key};
use crate::writer::EncodedWriter;

/// Maximum concurrent HTTP requests to subscription servers
const MAX_CONCURRENT_FETCHES: usize = 6;

/// Run the refresh command: fetch every configured subscription, normalize
/// it and rewrite its two exported lists.
///
/// Fetches run concurrently (bounded); each source is then normalized and
/// written independently, in configuration order. A fetch failure skips
/// that source only. A write failure aborts the whole run.
pub async fn run(config_path: &Path, out_dir: &Path, timeout_secs: u64, dry_run: bool) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if config.subscriptions.is_empty() {
        warn!("No subscriptions configured. Check your configuration.");
        return Ok(());
    }

    let schemes = config.scheme_set();
    let fetcher = Fetcher::new(Duration::from_secs(timeout_secs))?;
    let writer = EncodedWriter::new();

    if !dry_run {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;
    }

    info!("Refreshing {} subscription(s)...", config.subscriptions.len());

    // Fetch concurrently, keep configuration order for processing
    let fetches = stream::iter(config.subscriptions.iter().map(|sub| {
        let fetcher = &fetcher;
        async move { (sub, fetcher.fetch(&sub.url).await) }
    }))
    .buffered(MAX_CONCURRENT_FETCHES)
    .collect::<Vec<_>>()
    .await;

    let mut refreshed = 0usize;
    let mut skipped = 0usize;

    for (sub, fetched) in fetches {
        info!("Processing {} ({})", sub.key, sub.url);

        let raw = match fetched {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("Fetch failed for {}: {:#}", sub.url, err);
                skipped += 1;
                continue;
            }
        };

        let decoded = decode_payload(&raw, &schemes);
        let text = String::from_utf8_lossy(&decoded);
        let normal = dedupe(extract_entries(&text, &schemes));
        let lite = tail(&normal, config.lite.n);

        debug!(
            "{}: {} entries after normalization, {} in tail",
            sub.key,
            normal.len(),
            lite.len()
        );

        if dry_run {
            info!(
                "[dry-run] {}: {} entries, {} in lite",
                sub.key,
                format_count(normal.len()),
                lite.len()
            );
            refreshed += 1;
            continue;
        }

        let key_dir = out_dir.join(sanitize_key(&sub.key));
        std::fs::create_dir_all(&key_dir)
            .with_context(|| format!("Failed to create source directory {:?}", key_dir))?;

        writer
            .write(&key_dir.join("normal"), &sorted_full(&normal))
            .with_context(|| format!("Failed to write normal list for '{}'", sub.key))?;
        writer
            .write(&key_dir.join("lite"), &lite)
            .with_context(|| format!("Failed to write lite list for '{}'", sub.key))?;

        refreshed += 1;
    }

    info!(
        "Done: {} refreshed, {} skipped, {} downloaded",
        refreshed,
        skipped,
        format_bytes(fetcher.total_downloaded() as u64)
    );

    Ok(())
}
