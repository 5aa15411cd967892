use std::{path::Path, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use orbitgif::{
    GifOptions, OperationType, Pipeline, PipelineOptions, ProcessRenderer, ProgressCallback,
    ProgressInfo, RunOutcome, ViewSequencer,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  orbitgif convert bracket.sldprt out/bracket.gif --renderer render-view\n  orbitgif convert bracket.sldprt out/bracket.gif --renderer render-view --delay 25 --width 480 --progress\n  orbitgif validate bracket.sldprt out/bracket.gif\n  orbitgif sequence --json\n  orbitgif completions zsh > _orbitgif";

#[derive(Debug, Parser)]
#[command(
    name = "orbitgif",
    version,
    about = "Capture a sweep of model views and assemble them into an animated GIF",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar while capturing.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting an existing GIF.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a model into an animated GIF.
    #[command(
        about = "Convert a model into an animated GIF",
        after_help = "Examples:\n  orbitgif convert bracket.sldprt out/bracket.gif --renderer render-view\n  orbitgif convert gearbox.sldasm gearbox.gif --renderer render-view --renderer-arg=--high-quality --repeat 3"
    )]
    Convert {
        /// Model path (.sldprt or .sldasm).
        model: PathBuf,
        /// Output GIF path. Its directory is created if missing.
        output: PathBuf,
        /// Rendering program invoked once per captured view.
        #[arg(long)]
        renderer: PathBuf,
        /// Extra argument passed to the rendering program (repeatable).
        #[arg(long = "renderer-arg", allow_hyphen_values = true)]
        renderer_args: Vec<String>,
        /// Directory for transient frame files (defaults to the output directory).
        #[arg(long)]
        work_dir: Option<PathBuf>,
        /// Delay between frames in hundredths of a second.
        #[arg(long, default_value_t = 50)]
        delay: u16,
        /// Repeat count, or "forever".
        #[arg(long, default_value = "forever")]
        repeat: String,
        /// Scale frames to this width, preserving aspect ratio.
        #[arg(long)]
        width: Option<u32>,
        /// Print the outcome as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a model and output path without rendering.
    #[command(about = "Validate model and output paths")]
    Validate {
        model: PathBuf,
        output: PathBuf,
    },

    /// Print the orientation sweep used for every conversion.
    #[command(about = "Print the orientation sequence")]
    Sequence {
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_repeat(value: &str) -> Option<Option<u16>> {
    match value.to_ascii_lowercase().as_str() {
        "forever" | "infinite" | "loop" => Some(None),
        other => other.parse::<u16>().ok().map(Some),
    }
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

/// Checks every convert flag before the output directory is created.
fn prepare_output(
    output: &Path,
    overwrite: bool,
    delay: u16,
    repeat: &str,
    width: Option<u32>,
) -> Result<GifOptions, Box<dyn std::error::Error>> {
    let repeat = parse_repeat(repeat).ok_or(format!("unsupported --repeat: {repeat}"))?;
    let mut gif = GifOptions::new().frame_delay(delay).repeat(repeat);
    if let Some(width) = width {
        gif = gif.width(width);
    }

    ensure_writable_path(output, overwrite)?;
    orbitgif::ensure_destination_directory(output)?;
    Ok(gif)
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(total: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(total);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match info.operation {
            OperationType::Capture => {
                self.bar.set_position(info.current);
                if let Some(index) = info.current_frame {
                    self.bar.set_message(format!("captured frame {index}"));
                }
            }
            _ => self.bar.set_message("encoding"),
        }
    }
}

fn print_outcome(outcome: &RunOutcome, json: bool) {
    if json {
        let payload = json!({
            "success": outcome.is_success(),
            "run_id": outcome.run_id.to_string(),
            "reason": outcome.reason(),
            "frames": outcome.artifact().map(|artifact| artifact.frame_count),
            "removed_temp_files": outcome.cleanup.removed.len(),
            "warnings": outcome
                .warnings()
                .iter()
                .map(|warning| warning.to_string())
                .collect::<Vec<_>>(),
        });
        println!("{payload:#}");
        return;
    }

    for warning in outcome.warnings() {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            warning.to_string().yellow()
        );
    }
    if outcome.is_success() {
        println!("{} {}", "success:".green().bold(), outcome.reason().green());
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            model,
            output,
            renderer,
            renderer_args,
            work_dir,
            delay,
            repeat,
            width,
            json,
        } => {
            let report = orbitgif::validate_request(&model, &output);
            if cli.global.verbose {
                eprint!("{report}");
            }
            if !report.is_valid() {
                return Err(report
                    .errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "invalid request".to_string())
                    .into());
            }
            let gif = prepare_output(&output, cli.global.overwrite, delay, &repeat, width)?;

            let sequence = ViewSequencer::standard();
            let mut options = PipelineOptions::new().with_gif_options(gif);
            if let Some(directory) = work_dir {
                options = options.with_working_directory(directory);
            }
            let progress = if cli.global.progress {
                let progress = Arc::new(TerminalProgress::new(sequence.len() as u64)?);
                options = options.with_progress(progress.clone());
                Some(progress)
            } else {
                None
            };

            if cli.global.verbose {
                eprintln!("rendering {} with {}", model.display(), renderer.display());
            }

            let mut renderer =
                ProcessRenderer::new(renderer, model.clone()).with_args(renderer_args);
            let outcome = Pipeline::new(options).run(&mut renderer, sequence, &output);

            if let Some(progress) = progress {
                progress.bar.finish_with_message("done");
            }
            if cli.global.verbose {
                eprintln!(
                    "run {} removed {} temp file(s)",
                    outcome.run_id,
                    outcome.cleanup.removed.len()
                );
            }

            print_outcome(&outcome, json);
            if let Err(error) = outcome.into_result() {
                return Err(
                    format!("Failed to create GIF from {}: {error}", model.display()).into(),
                );
            }
        }
        Commands::Validate { model, output } => {
            let report = orbitgif::validate_request(&model, &output);
            print!("{report}");
            if !report.is_valid() {
                return Err("validation failed".into());
            }
        }
        Commands::Sequence { json } => {
            let sequence = ViewSequencer::standard();
            if json {
                let payload: Vec<_> = sequence
                    .orientations()
                    .iter()
                    .enumerate()
                    .map(|(position, orientation)| {
                        json!({
                            "frame": position + 1,
                            "commands": orientation
                                .commands()
                                .iter()
                                .map(|command| command.token())
                                .collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{:#}", json!(payload));
            } else {
                for (position, orientation) in sequence.into_iter().enumerate() {
                    println!("{:>2}. {orientation}", position + 1);
                }
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "orbitgif", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
