//! Catalog search command.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use tokio::runtime::Runtime;

use crate::{config, error};
use crate::search::{SearchOptions, SearchResult, SearchService};

/// Arguments for `search`
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term
    pub term: String,
    /// Minimum bitrate in kbps
    #[arg(short = 'q', long)]
    pub min_quality: Option<u32>,
    /// Number of tracks to return
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    /// Native results page to start from
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
    /// Look up artist and link for every track
    #[arg(long)]
    pub extended: bool,
    /// Time budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Catalog root URL (overrides the config file)
    #[arg(long, env = "GOEAR_BASE_URL")]
    pub base_url: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Layer command-line flags over the configured defaults
    pub fn options(&self, defaults: &config::SearchDefaults) -> SearchOptions {
        let mut options = defaults.to_options().with_offset(self.offset);
        if let Some(min_quality) = self.min_quality {
            options.min_quality = min_quality;
        }
        if let Some(count) = self.count {
            options.results_count = count;
        }
        if self.extended {
            options.extended_info = true;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            options.timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
        }
        options
    }
}

/// Run a search and print the results
pub fn cmd_search(rt: &Runtime, args: &SearchArgs) -> error::Result<()> {
    let config = config::load();

    let mut source = config.source.to_search_config();
    if let Some(base_url) = &args.base_url {
        source.base_url = base_url.clone();
    }
    let options = args.options(&config.search);

    let service = SearchService::new(source)?;
    let result = rt.block_on(service.search(&args.term, options))?;

    let stdout = std::io::stdout();
    print_result(&mut stdout.lock(), &result, args.json, &service.referer())?;
    Ok(())
}

/// Print a result as pretty JSON or as a text listing
pub fn print_result(
    out: &mut impl Write,
    result: &SearchResult,
    json: bool,
    referer: &str,
) -> error::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, result)?;
        writeln!(out)?;
    } else {
        write_text(out, result, referer)?;
    }
    Ok(())
}

/// Human-readable listing of a search result
pub fn write_text(out: &mut impl Write, result: &SearchResult, referer: &str) -> std::io::Result<()> {
    match result.total_count {
        Some(total) => writeln!(out, "{} track(s) ({} in catalog)", result.tracks.len(), total)?,
        None => writeln!(out, "{} track(s)", result.tracks.len())?,
    }
    if result.tracks.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    for (i, track) in result.tracks.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} - {} [{} kbps, {}]",
            i + 1,
            track.artist,
            track.title,
            track.quality,
            track.duration
        )?;
        writeln!(out, "     {}", track.link)?;
    }
    writeln!(out)?;
    writeln!(out, "Links must be requested with 'Referer: {}'", referer)?;
    Ok(())
}
