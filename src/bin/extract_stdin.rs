//! Reads HTML from stdin and prints the extracted content as JSON.
//!
//! Usage: `extract_stdin [CANONICAL_URL] < page.html`

use std::io::{self, Read};

use anyhow::{Context, Result};

use rs_html2md::extract_bytes;

fn main() -> Result<()> {
    let canonical_url = std::env::args().nth(1).unwrap_or_default();

    let mut html = Vec::new();
    io::stdin()
        .read_to_end(&mut html)
        .context("failed to read HTML from stdin")?;

    let content = extract_bytes(&html, None, &canonical_url);
    println!("{}", serde_json::to_string(&content)?);
    Ok(())
}
