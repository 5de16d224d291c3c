//! votemap CLI
//!
//! Usage:
//!   votemap <COMMAND> <MAP> [ARGS]
//!
//! Commands:
//!   prepare   Install the election overlay onto a plain region map
//!   add       Add a candidate
//!   remove    Remove a candidate
//!   list      List candidates with their colors
//!   votes     Set a candidate's vote count
//!   color     Change a candidate's display color
//!   title     Set or clear the map title
//!   regions   List region identifiers
//!   region    Recolor a region or set its numeric label
//!   bar       Redraw the vote bar from a TOML tally file

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use votemap::{
    BarSnapshot, CandidateRef, Color, ElectionMap, MapConfig, MapError, Portrait,
};

#[derive(Parser)]
#[command(name = "votemap")]
#[command(about = "Edit SVG election maps: candidates, regions and the vote bar")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file overriding the built-in layout constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the result here instead of editing the map in place
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Install the election overlay onto a plain region map
    Prepare { map: PathBuf },

    /// Add a candidate
    Add {
        map: PathBuf,
        name: String,
        color: Color,
        /// Portrait image reference, relative to the map file
        #[arg(long, conflicts_with = "embed")]
        portrait: Option<String>,
        /// Portrait image file to embed as a data URI
        #[arg(long)]
        embed: Option<PathBuf>,
    },

    /// Remove a candidate
    Remove { map: PathBuf, name: String },

    /// List candidates with their colors
    List { map: PathBuf },

    /// Set a candidate's vote count
    Votes {
        map: PathBuf,
        name: String,
        votes: u64,
        /// Recolor the vote label
        #[arg(long)]
        color: Option<Color>,
    },

    /// Change a candidate's display color (their regions keep the old fill)
    Color {
        map: PathBuf,
        name: String,
        color: Color,
    },

    /// Set the map title, or clear it when no text is given
    Title {
        map: PathBuf,
        text: Option<String>,
        #[arg(long)]
        color: Option<Color>,
    },

    /// List region identifiers, optionally only those held by a candidate
    Regions {
        map: PathBuf,
        /// Candidate name to filter by
        #[arg(long)]
        of: Option<String>,
    },

    /// Recolor a region or set its numeric label
    Region {
        map: PathBuf,
        id: String,
        #[arg(long)]
        color: Option<Color>,
        #[arg(long)]
        number: Option<i64>,
    },

    /// Redraw the vote bar from a TOML tally file
    Bar { map: PathBuf, data: PathBuf },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), MapError> {
    let config = match &cli.config {
        Some(path) => MapConfig::from_file(path)?,
        None => MapConfig::default(),
    };
    let output = cli.output;

    match cli.command {
        Command::Prepare { map } => edit(&map, output, config, |m| m.prepare()),

        Command::Add {
            map,
            name,
            color,
            portrait,
            embed,
        } => {
            let portrait = embed
                .map(Portrait::Embed)
                .or(portrait.map(Portrait::Href));
            edit(&map, output, config, |m| {
                m.add_candidate(&name, color, portrait)
            })
        }

        Command::Remove { map, name } => {
            edit(&map, output, config, |m| m.remove_candidate(&name))
        }

        Command::List { map } => {
            let map = ElectionMap::open_with_config(&map, config)?;
            for (name, color) in map.candidates()? {
                println!("{}\t{}", name, color);
            }
            Ok(())
        }

        Command::Votes {
            map,
            name,
            votes,
            color,
        } => edit(&map, output, config, |m| {
            m.set_candidate_votes(&name, votes, color)
        }),

        Command::Color { map, name, color } => {
            edit(&map, output, config, |m| m.set_candidate_color(&name, color))
        }

        Command::Title { map, text, color } => edit(&map, output, config, |m| {
            m.set_title(text.as_deref(), color)
        }),

        Command::Regions { map, of } => {
            let map = ElectionMap::open_with_config(&map, config)?;
            let ids = match &of {
                Some(name) => map.candidate_regions(CandidateRef::Name(name))?,
                None => map.regions()?,
            };
            for id in ids {
                println!("{}", id);
            }
            Ok(())
        }

        Command::Region {
            map,
            id,
            color,
            number,
        } => edit(&map, output, config, |m| {
            if let Some(color) = color {
                m.set_region_color(&id, color)?;
            }
            if let Some(number) = number {
                m.set_region_number(&id, number, None)?;
            }
            Ok(())
        }),

        Command::Bar { map, data } => {
            let snapshot = load_snapshot(&data)?;
            edit(&map, output, config, |m| m.render_bar(&snapshot))
        }
    }
}

/// Open a map, apply one mutation, and write it back (in place unless an
/// output path was given).
fn edit(
    map_path: &Path,
    output: Option<PathBuf>,
    config: MapConfig,
    op: impl FnOnce(&mut ElectionMap) -> Result<(), MapError>,
) -> Result<(), MapError> {
    let mut map = ElectionMap::open_with_config(map_path, config)?;
    op(&mut map)?;
    map.save(output.as_deref().unwrap_or(map_path))
}

fn load_snapshot(path: &Path) -> Result<BarSnapshot, MapError> {
    let content = std::fs::read_to_string(path).map_err(votemap::DocumentError::Io)?;
    let snapshot =
        toml::from_str(&content).map_err(votemap::ConfigError::Parse)?;
    Ok(snapshot)
}
