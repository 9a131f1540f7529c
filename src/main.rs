use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Print the dominant colors of a logo image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Logo URL. Prompted for on stdin when omitted
    url: Option<String>,

    /// Maximum number of colors to print
    #[arg(short = 'n', long, default_value_t = logo_palette::DEFAULT_MAX_COLORS)]
    max_colors: usize,

    /// Bound on the longer edge of the image before quantizing
    #[arg(short, long, default_value_t = logo_palette::DEFAULT_RESIZE_TO)]
    resize_to: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let url = match args.url {
        Some(url) => url,
        None => prompt("Logo URL: ")?,
    };

    let colors = logo_palette::extract(url.trim(), args.max_colors, args.resize_to)
        .with_context(|| format!("failed to extract palette from {url:?}"))?;

    println!("{colors:?}");
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read URL from stdin")?;

    Ok(line)
}
