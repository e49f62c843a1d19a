use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use worldconv_common::{Defaults, Glyphs};
use worldconv_persist::{WorldFormat, store};
use worldconv_tools::WorldInspector;

#[derive(Parser)]
#[command(
    name = "worldconv",
    version,
    about = "Convert cellular-automaton worlds between text and binary form"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with default glyphs, generation and state
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a text world into a binary world
    #[command(visible_alias = "t")]
    ToBinary {
        input: PathBuf,
        output: PathBuf,
        /// Generation to store (text worlds carry none)
        #[arg(long)]
        generation: Option<u32>,
        /// State flag to store (text worlds carry none)
        #[arg(long)]
        state: Option<u16>,
    },
    /// Convert a binary world into a text world
    #[command(visible_alias = "b")]
    ToText {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        glyphs: GlyphArgs,
    },
    /// Print a summary of a world file of either format
    Info {
        input: PathBuf,
        #[command(flatten)]
        glyphs: GlyphArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GlyphArgs {
    /// Glyph for live cells (binary worlds carry none)
    #[arg(long, value_parser = parse_glyph)]
    on: Option<char>,
    /// Glyph for dead cells (binary worlds carry none)
    #[arg(long, value_parser = parse_glyph)]
    off: Option<char>,
}

fn parse_glyph(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if Glyphs::is_valid(ch) => Ok(ch),
        (Some(_), None) => Err(format!("{value:?} cannot appear in a text world")),
        _ => Err("expected a single character".to_string()),
    }
}

impl GlyphArgs {
    fn apply(&self, defaults: &mut Defaults) {
        if let Some(on) = self.on {
            defaults.glyphs.on = on;
        }
        if let Some(off) = self.off {
            defaults.glyphs.off = off;
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Defaults> {
    match path {
        Some(path) => store::load_defaults(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(Defaults::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut defaults = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::ToBinary {
            input,
            output,
            generation,
            state,
        } => {
            if let Some(generation) = generation {
                defaults.generation = generation;
            }
            if let Some(state) = state {
                defaults.state = state;
            }
            debug!(?defaults, "converting text to binary");
            let world = store::convert(&input, &output, WorldFormat::Text, &defaults)
                .with_context(|| format!("converting {} to binary", input.display()))?;
            println!("{}", WorldInspector::summary(&world));
        }
        Commands::ToText {
            input,
            output,
            glyphs,
        } => {
            glyphs.apply(&mut defaults);
            debug!(?defaults, "converting binary to text");
            let world = store::convert(&input, &output, WorldFormat::Binary, &defaults)
                .with_context(|| format!("converting {} to text", input.display()))?;
            println!("{}", WorldInspector::summary(&world));
        }
        Commands::Info {
            input,
            glyphs,
            json,
        } => {
            glyphs.apply(&mut defaults);
            let (format, world) = store::load_detected(&input, &defaults)
                .with_context(|| format!("reading {}", input.display()))?;
            let summary = WorldInspector::summary(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} ({format})", summary);
            }
        }
    }

    Ok(())
}
