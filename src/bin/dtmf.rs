//! DTMF command-line front end

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dtmf_core::audio::{AudioDevice, OfflineDevice};
use dtmf_core::graph::{self, SvgSurface};
use dtmf_core::options::SessionConfig;
use dtmf_core::sequencer::Sequencer;
use dtmf_core::session::{LinesInput, Session};
use dtmf_core::timer::TokioTimer;
use dtmf_core::{dsp, input::DigitSequence, tone};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dtmf")]
#[command(about = "Play and plot DTMF keypad tones")]
#[command(version = dtmf_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON session config (defaults to config.json in the user config dir)
    #[arg(short, long, env = "DTMF_CONFIG")]
    config: Option<PathBuf>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Output volume, 0 to 1
    #[arg(long)]
    volume: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for digits and play them (the default)
    Play {
        /// Play these digits once instead of prompting
        #[arg(short, long)]
        digits: Option<String>,
        /// Do not draw graphs
        #[arg(long)]
        no_graph: bool,
        /// Mirror the displayed graph as SVG into this directory
        #[arg(long)]
        graph_dir: Option<PathBuf>,
        /// Render into a WAV file instead of the speakers
        #[arg(long)]
        wav: Option<PathBuf>,
    },
    /// Render digits to a WAV file
    Render {
        #[arg(short, long)]
        digits: String,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Write one digit's waveform graph as SVG
    Graph {
        digit: u8,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print the tone table
    Table,
}

/// Exit status after an interrupt, as a shell reports SIGINT.
const INTERRUPTED: i32 = 130;

/// First Ctrl-C cancels the running session; a second one exits at once.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        let mut presses = 0;
        while tokio::signal::ctrl_c().await.is_ok() {
            presses += 1;
            if presses > 1 {
                std::process::exit(INTERRUPTED);
            }
            info!("interrupted, stopping");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, cli.json_logs)?;

    let mut config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Play {
        digits: None,
        no_graph: false,
        graph_dir: None,
        wav: None,
    }) {
        Commands::Play {
            digits,
            no_graph,
            graph_dir,
            wav,
        } => {
            if no_graph {
                config.show_graph = false;
            }
            if graph_dir.is_some() {
                config.graph_dir = graph_dir;
            }
            let cancel = CancellationToken::new();
            spawn_interrupt_handler(cancel.clone());
            play(&config, digits.as_deref(), wav, cancel.clone()).await?;
            // The stdin reader runs on a blocking thread that would hold up
            // runtime shutdown until the next line arrives.
            if cancel.is_cancelled() {
                std::process::exit(INTERRUPTED);
            }
            Ok(())
        }
        Commands::Render { digits, out } => {
            let seq = DigitSequence::parse(&digits);
            std::fs::write(&out, dsp::renderer::render_wav(seq.digits(), &config.playback))?;
            info!(tones = %seq.joined(), path = %out.display(), "wav written");
            Ok(())
        }
        Commands::Graph { digit, out } => {
            let plot = graph::plot_digit(digit)?;
            let svg = graph::canvas::render_svg(&plot, &graph::title(digit), graph::WIDTH, graph::HEIGHT);
            std::fs::write(&out, svg)?;
            info!(digit, path = %out.display(), "graph written");
            Ok(())
        }
        Commands::Table => {
            for (digit, t) in tone::TONE_TABLE.iter().enumerate() {
                println!("{digit}  {:>4} Hz  {:>4} Hz", t.low, t.high);
            }
            Ok(())
        }
    }
}

fn setup_logging(level: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level: tracing::Level = level.parse().map_err(|_| format!("Invalid log level: {level}"))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().compact().with_writer(std::io::stderr)).init();
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let path = cli.config.clone().or_else(|| {
        directories::ProjectDirs::from("", "", "dtmf")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .filter(|p| p.exists())
    });
    let mut config = match path {
        Some(p) => {
            info!(path = %p.display(), "loading config");
            SessionConfig::load(&p)?
        }
        None => SessionConfig::default(),
    };
    if let Some(rate) = cli.sample_rate {
        config.playback.sample_rate = rate;
    }
    if let Some(volume) = cli.volume {
        config.playback.volume = volume;
    }
    config.playback.validate()?;
    Ok(config)
}

async fn play(
    config: &SessionConfig,
    digits: Option<&str>,
    wav: Option<PathBuf>,
    cancel: CancellationToken,
) -> Result<(), Box<dyn std::error::Error>> {
    let surface = match &config.graph_dir {
        Some(dir) => SvgSurface::with_output_dir(dir),
        None => SvgSurface::new(),
    };

    let input = LinesInput::new(tokio::io::BufReader::new(tokio::io::stdin()), cancel.clone());
    let timer = TokioTimer::new(cancel);

    #[cfg(feature = "playback")]
    if wav.is_none() {
        match dtmf_core::audio::RodioDevice::open() {
            Ok(device) => {
                let device = run_session(device, surface, timer, input, config, digits).await;
                device.drain();
                return Ok(());
            }
            Err(e) => warn!(error = %e, "speakers unavailable, rendering offline"),
        }
    }
    #[cfg(not(feature = "playback"))]
    if wav.is_none() {
        warn!("built without speaker output, rendering offline");
    }

    let device = match wav {
        Some(_) => OfflineDevice::new(config.playback.sample_rate),
        None => OfflineDevice::clock_only(config.playback.sample_rate),
    };
    let device = run_session(device, surface, timer, input, config, digits).await;
    if let Some(path) = wav {
        std::fs::write(&path, device.to_wav())?;
        info!(tones = device.history().len(), path = %path.display(), "wav written");
    }
    Ok(())
}

/// Run one line (or an interactive loop) and hand the device back.
async fn run_session<D: AudioDevice, R: tokio::io::AsyncBufRead + Unpin>(
    device: D,
    surface: SvgSurface,
    timer: TokioTimer,
    input: LinesInput<R>,
    config: &SessionConfig,
    digits: Option<&str>,
) -> D {
    let sequencer = Sequencer::new(device, surface, timer).with_config(config);
    let mut session = Session::new(input, sequencer);
    match digits {
        Some(line) => {
            let report = session.play_line(line).await;
            info!(played = report.played.len(), skipped = report.skipped.len(), "sequence done");
        }
        None => {
            let summary = session.run().await;
            info!(cycles = summary.cycles, tones = summary.tones, "session done");
        }
    }
    let (device, _, _) = session.into_sequencer().into_parts();
    device
}
