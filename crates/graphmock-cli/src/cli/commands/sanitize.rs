//! `graphmock sanitize <url>` – sanitize one URL and print it.

use anyhow::Result;
use graphmock_core::config::GraphmockConfig;
use graphmock_core::mocks::generalize_url;
use graphmock_core::sanitize::try_sanitize_url;

pub fn run_sanitize(cfg: &GraphmockConfig, url: &str, wildcard: bool) -> Result<()> {
    if wildcard {
        let masked = generalize_url(url, &cfg.graph_origin, &cfg.graph_version);
        if masked.trim().is_empty() {
            anyhow::bail!("unable to sanitize URL: {url}");
        }
        println!("{masked}");
    } else {
        println!("{}", try_sanitize_url(url)?);
    }
    Ok(())
}
