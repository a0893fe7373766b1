use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use region_picker::ViewerSession;
use region_picker::event_source::{EventSource, ScriptEventSource};
use region_picker::panic_handler::initialize_panic_handler;
use region_picker::replay::replay;
use region_picker::settings::{LogLevel, OutputFormat, Settings, load_settings};
use region_picker::sink::{JsonSink, LogSink, RegionSink};
use region_picker::widget::SelectionReadout;

#[derive(Parser, Debug)]
#[command(
    name = "region-picker",
    version,
    about = "Replay recorded viewer sessions and report the selected page region"
)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines event script through a viewer session
    Replay {
        /// Script to replay, `-` for stdin
        script: PathBuf,

        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Where saved regions go
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print the effective settings as YAML
    PrintConfig,
}

fn init_logging(settings: &Settings) -> Result<()> {
    let level = LevelFilter::from(settings.log_level);
    if level == LevelFilter::Off {
        return Ok(());
    }
    let file = File::create(&settings.log_file)
        .with_context(|| format!("creating log file {:?}", settings.log_file))?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn open_script(path: &PathBuf) -> Result<Box<dyn EventSource>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(ScriptEventSource::new(io::stdin().lock())));
    }
    let file = File::open(path).with_context(|| format!("opening script {path:?}"))?;
    Ok(Box::new(ScriptEventSource::new(BufReader::new(file))))
}

fn run_replay(script: &PathBuf, settings: &Settings) -> Result<()> {
    let mut source = open_script(script)?;
    let mut session = ViewerSession::new();
    let mut sink: Box<dyn RegionSink> = match settings.output_format {
        OutputFormat::Log => Box::new(LogSink),
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout().lock())),
    };

    let summary = replay(source.as_mut(), &mut session, sink.as_mut())?;
    info!(
        "Replayed {} events ({} skipped, {} saved)",
        summary.applied + summary.skipped,
        summary.skipped,
        summary.saved
    );

    if settings.output_format == OutputFormat::Log {
        for line in SelectionReadout::from_session(&session).text_lines() {
            println!("{line}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Replay {
            script,
            log_file,
            log_level,
            format,
        } => {
            if let Some(log_file) = log_file {
                settings.log_file = log_file;
            }
            if let Some(log_level) = log_level {
                settings.log_level = log_level;
            }
            if let Some(format) = format {
                settings.output_format = format;
            }

            init_logging(&settings)?;
            initialize_panic_handler();
            info!("Starting region-picker replay of {script:?}");
            run_replay(&script, &settings)
        }
        Command::PrintConfig => {
            print!("{}", settings.to_yaml()?);
            Ok(())
        }
    }
}
