//! Wiring from parsed arguments to the unbundling pipeline.

use anyhow::{bail, Context, Result};
use tracing::info;

use ponpm_core::{
    normalize_prefix, ArchiveUnpacker, BlockingStore, CloudLocation, Publisher, UnpackOptions,
    Unbundler,
};

use super::{Args, RunSummary};

/// Parse a location URL, applying endpoint and signing options.
fn location(url: &str, args: &Args) -> Result<CloudLocation> {
    let mut location = CloudLocation::parse(url)
        .with_context(|| format!("Invalid location: {url}"))?
        .with_anonymous(args.anonymous);
    if let Some(endpoint) = &args.endpoint {
        location = location.with_endpoint(endpoint.clone());
    }
    Ok(location)
}

/// Process the bundle named by `args` and describe what was published.
///
/// `memory://` is refused as a source: every invocation gets a fresh,
/// empty in-process store, so there would be nothing to fetch.
pub fn run(args: &Args) -> Result<RunSummary> {
    let source_url = args
        .source
        .as_deref()
        .context("Source URL required. Use --help for usage.")?;
    let dest_url = args
        .dest
        .as_deref()
        .context("Destination URL required (--dest). Use --help for usage.")?;

    let source = location(source_url, args)?;
    if source.scheme() == "memory" {
        bail!("memory:// cannot be used as a source: the store starts empty");
    }
    let dest = location(dest_url, args)?;

    let source_store = BlockingStore::open(&source)
        .with_context(|| format!("Failed to open source store: {}", source.store_name()))?;
    let dest_store = BlockingStore::open(&dest)
        .with_context(|| format!("Failed to open destination store: {}", dest.store_name()))?;

    let unpacker = ArchiveUnpacker::new(Publisher::new(dest_store)).with_options(UnpackOptions {
        include_header: args.header,
    });
    let mut unbundler = Unbundler::new(source_store, unpacker);

    info!(source = %source_url, dest = %dest_url, "Unbundling");
    let bundle = unbundler
        .unbundle(source.key(), dest.key())
        .with_context(|| format!("Failed to unbundle {source_url}"))?;

    Ok(RunSummary::new(
        source.store_name(),
        dest.store_name(),
        normalize_prefix(dest.key()),
        bundle,
    ))
}
