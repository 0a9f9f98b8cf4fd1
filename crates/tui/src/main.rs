mod content;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use section_pager_core::{PagerConfig, SectionPager};
use section_pager_protocol::SectionLayout;

/// Page through full-screen sections in the terminal.
#[derive(Debug, Parser)]
#[command(name = "section-pager", version)]
struct Args {
    /// TOML file with pager thresholds; defaults apply to missing keys.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of sections to show.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    sections: u16,

    /// Pixels reported for one mouse wheel notch.
    #[arg(long, default_value_t = 100.0)]
    wheel_delta: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PagerConfig::from_toml_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PagerConfig::default(),
    };

    let sections = content::sections(usize::from(args.sections));
    let layout = SectionLayout::new(sections.iter().map(|s| s.lines.len()).collect());
    let pager = SectionPager::new(layout, config)?;

    renderer::run_tui(pager, &sections, args.wheel_delta)?;
    Ok(())
}
