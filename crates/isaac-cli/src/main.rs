use anyhow::Result;
use clap::{Parser, Subcommand};
use isaac_core::{decode_angle_base64, decode_str, encode, SignedReal, Viewport};
use isaac_data::{ImpulseFeed, MacroStateFeed};
use isaac_engine::{Frame, ViewConfig, Viewer};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "isaac")]
#[command(about = "Inspect three-body universe feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a field element (decimal or 0x hex) to a signed real
    DecodeFelt {
        value: String,
    },

    /// Encode a signed decimal as a field element
    EncodeReal {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Decode a base64 planet orientation to degrees
    DecodePhi {
        value: String,
    },

    /// Compose a frame from saved feeds and print it as JSON
    Frame {
        #[arg(long)]
        macro_states: PathBuf,
        #[arg(long)]
        impulses: PathBuf,
        #[arg(long, default_value = "700")]
        width: f64,
        #[arg(long, default_value = "815")]
        height: f64,
        /// View configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the tooltip text of every impulse
    Tooltips {
        #[arg(long)]
        macro_states: PathBuf,
        #[arg(long)]
        impulses: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_viewer(
    macro_states: &Path,
    impulses: &Path,
    config: Option<&Path>,
    viewport: Viewport,
) -> Result<Viewer> {
    let config = match config {
        Some(path) => ViewConfig::load(path)?,
        None => ViewConfig::default(),
    };

    tracing::info!("Loading feeds from {:?} and {:?}", macro_states, impulses);

    let mut viewer = Viewer::new(config, viewport);
    viewer.set_history(&MacroStateFeed::load(macro_states)?.history())?;
    viewer.set_impulses(&ImpulseFeed::load(impulses)?.current())?;
    Ok(viewer)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DecodeFelt { value } => {
            let real = decode_str(&value)?;
            println!("{} ({:e})", real, real.to_f64());
        }

        Commands::EncodeReal { value } => {
            let real: SignedReal = value.parse()?;
            println!("{}", encode(&real)?);
        }

        Commands::DecodePhi { value } => {
            println!("{}", decode_angle_base64(&value)?);
        }

        Commands::Frame { macro_states, impulses, width, height, config } => {
            if !(width > 0.0 && height > 0.0) {
                anyhow::bail!("Viewport must be positive, got {}x{}", width, height);
            }

            let viewer = load_viewer(&macro_states, &impulses, config.as_deref(), Viewport::new(width, height))?;
            let Some(frame) = viewer.frame() else {
                anyhow::bail!("Both feeds are required");
            };
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }

        Commands::Tooltips { macro_states, impulses, config } => {
            let viewer = load_viewer(&macro_states, &impulses, config.as_deref(), Viewport::default())?;

            match viewer.frame() {
                Some(Frame::Active(frame)) => {
                    if frame.tooltips.is_empty() {
                        println!("No impulses");
                    }
                    for tooltip in &frame.tooltips {
                        for line in tooltip.lines() {
                            println!("{}", line);
                        }
                        println!();
                    }
                }
                Some(Frame::Idle { message }) => println!("{}", message),
                None => anyhow::bail!("Both feeds are required"),
            }
        }
    }

    Ok(())
}
