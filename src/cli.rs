//! Command-line interface for par-vfont.
//!
//! This module handles argument parsing and dispatches the `render`,
//! `measure` and `init-config` subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use par_vfont_config::{Color, Config};

use crate::render_job::{self, FontChoice, Placement};

/// par-vfont - rasterize a line of UTF-8 text with a TrueType font
#[derive(Parser, Debug)]
#[command(name = "par-vfont")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/par-vfont/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Font selection flags shared by `render` and `measure`.
#[derive(Args, Debug, Clone, Default)]
pub struct FontArgs {
    /// Font file (TTF/OTF/TTC)
    #[arg(long, value_name = "PATH", conflicts_with = "family")]
    pub font: Option<PathBuf>,

    /// System font family name
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Face index within a font collection
    #[arg(long, value_name = "N")]
    pub face_index: Option<u32>,

    /// Pixel size
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Disable hinting
    #[arg(long)]
    pub no_hinting: bool,

    /// Render 1-bit mono glyphs instead of anti-aliased ones
    #[arg(long)]
    pub mono: bool,
}

impl From<FontArgs> for FontChoice {
    fn from(args: FontArgs) -> Self {
        FontChoice {
            path: args.font,
            family: args.family,
            face_index: args.face_index,
            size: args.size,
            no_hinting: args.no_hinting,
            mono: args.mono,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one line of text to a PNG file
    Render {
        #[command(flatten)]
        font: FontArgs,

        /// Text to render
        #[arg(long)]
        text: String,

        /// Pen start x
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,

        /// Baseline y (defaults to the font size, i.e. a line starting at the top)
        #[arg(long, allow_negative_numbers = true)]
        y: Option<i32>,

        /// Treat --y as the top of the line; the baseline goes at y + size
        #[arg(long)]
        top: bool,

        /// Text color (#RRGGBB or #AARRGGBB)
        #[arg(long, value_name = "COLOR")]
        color: Option<Color>,

        /// Canvas color (#RRGGBB or #AARRGGBB)
        #[arg(long, value_name = "COLOR")]
        background: Option<Color>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Output PNG path
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },

    /// Print the advance width of a line of text
    Measure {
        #[command(flatten)]
        font: FontArgs,

        /// Text to measure
        #[arg(long)]
        text: String,
    },

    /// Write the default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Load config from `--config` or the default location.
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("Failed to load config {:?}", path))
        }
        None => Config::load().context("Failed to load config"),
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::InitConfig { force } => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            init_config(&path, force)
        }
        Commands::Render {
            font,
            text,
            x,
            y,
            top,
            color,
            background,
            width,
            height,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let resolved = render_job::resolve_font(&font.into(), &config)?;
            let mut vfont = resolved.open()?;

            let baseline = match (y, top) {
                (Some(y), false) => y,
                (Some(y), true) => Placement::baseline_from_top(y, resolved.size),
                (None, _) => Placement::baseline_from_top(0, resolved.size),
            };
            let placement = Placement {
                x,
                baseline,
                color: color.unwrap_or(config.text_color),
                background: background.unwrap_or(config.background_color),
                width: width.unwrap_or(config.canvas_width),
                height: height.unwrap_or(config.canvas_height),
            };
            if placement.width == 0 || placement.height == 0 {
                bail!("Canvas must be non-empty");
            }

            render_job::render_to_file(&mut vfont, &text, &placement, &output)?;
            println!("{}", output.display());
            Ok(())
        }
        Commands::Measure { font, text } => {
            let config = load_config(cli.config.as_deref())?;
            let resolved = render_job::resolve_font(&font.into(), &config)?;
            let mut vfont = resolved.open()?;
            let extent = render_job::measure(&mut vfont, &text);
            println!("{}", extent.width);
            Ok(())
        }
    }
}

fn init_config(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file {:?} already exists (use --force to overwrite)",
            path
        );
    }
    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write config {:?}", path))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
