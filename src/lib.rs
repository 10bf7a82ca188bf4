//! # Subrefine - Proxy Subscription Feed Refiner
//!
//! Fetches remote proxy-subscription feeds, normalizes them and re-exports
//! each one as two plain-text artifacts safe for dumb static hosting.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Subrefine                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                │
//! │    └── Commands: refresh, version                          │
//! ├────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                       │
//! │    └── allowed_schemes, lite.n, subscriptions              │
//! ├────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                │
//! │    └── one raw payload per subscription source             │
//! ├────────────────────────────────────────────────────────────┤
//! │  Decoder (base64)                                          │
//! │    └── whole-payload base64 detection and decoding         │
//! ├────────────────────────────────────────────────────────────┤
//! │  Parser                                                    │
//! │    └── line extraction, multi-URI splitting, scheme filter │
//! ├────────────────────────────────────────────────────────────┤
//! │  Aggregator                                                │
//! │    └── order-preserving dedup, sorted + tail projections   │
//! ├────────────────────────────────────────────────────────────┤
//! │  Writer (tempfile)                                         │
//! │    └── base64-encoded atomic replace with bounded retries  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use subrefine::aggregator::{dedupe, sorted_full, tail};
//! use subrefine::config::Config;
//! use subrefine::decoder::decode_payload;
//! use subrefine::fetcher::Fetcher;
//! use subrefine::parser::extract_entries;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let schemes = config.scheme_set();
//!
//!     let fetcher = Fetcher::new(Duration::from_secs(20))?;
//!     for sub in &config.subscriptions {
//!         let raw = fetcher.fetch(&sub.url).await?;
//!         let decoded = decode_payload(&raw, &schemes);
//!         let text = String::from_utf8_lossy(&decoded);
//!         let normal = dedupe(extract_entries(&text, &schemes));
//!         let _sorted = sorted_full(&normal);
//!         let _recent = tail(&normal, config.lite.n);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`aggregator`] - Order-preserving dedup and the two output projections
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and the allowed-scheme set
//! - [`decoder`] - Whole-payload base64 detection
//! - [`fetcher`] - HTTP client for downloading subscription feeds
//! - [`parser`] - Line extraction, multi-URI splitting, scheme filtering
//! - [`utils`] - Common utility functions (formatting, key sanitizing)
//! - [`writer`] - Base64-encoded atomic file writer

pub mod aggregator;
pub mod cli;
pub mod commands;
pub mod config;
pub mod decoder;
pub mod fetcher;
pub mod parser;
pub mod utils;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::{Config, SchemeSet};
