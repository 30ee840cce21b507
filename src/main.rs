use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vox_edit::command::{self, CommandEvent};
use vox_edit::config::{self, EditorConfig};
use vox_edit::editor::Editor;
use vox_edit::imaging::{RustBackend, load_snapshot, rust_backend, save_snapshot};
use vox_edit::session::{CommandSender, ConsoleSink, Session, command_queue, feed_lines};
use vox_edit::{output, phrases};

fn version_string() -> &'static str {
    if env!("VOX_EDIT_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("VOX_EDIT_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "vox-edit")]
#[command(about = "Edit images with short spoken phrases")]
#[command(long_about = "\
Edit images with short spoken phrases

Each input line is one phrase, as a speech recognizer would deliver it.
Phrases are applied in order; every change can be undone.

  Set Brightness To 40         Init Crop
  Set Contrast To -20          Set Crop Position To 10 And 20
  Convert To Grayscale         Set Crop Width To 200 And Height To 100
  Set Filter Orange            Crop Image | Cancel Crop
  Flip Image | Rotate Image    Undo Action

Lines starting with '#' are ignored in scripts.

Run 'vox-edit phrases' for the full vocabulary and
'vox-edit gen-config' to generate a documented vox-edit.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing vox-edit.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Edit an image with phrases read from stdin or a script
    Run {
        /// Image to edit
        image: PathBuf,
        /// Read phrases from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
        /// Save the final image here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Apply phrases given on the command line and save the result
    Apply {
        /// Image to edit
        image: PathBuf,
        /// Phrase to apply (repeatable, applied in order)
        #[arg(long = "command", short = 'c', required = true)]
        commands: Vec<String>,
        /// Save the final image here
        #[arg(long, short)]
        output: PathBuf,
    },
    /// List the accepted phrases and image formats
    Phrases,
    /// Print a stock vox-edit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Run {
            image,
            script,
            output,
        } => {
            let config = config::load_config(&cli.config)?;
            let input: Box<dyn BufRead + Send> = match &script {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(BufReader::new(std::io::stdin())),
            };
            run_session(&image, &config, output.as_deref(), move |commands| {
                feed_lines(input, &commands)
            })?;
        }
        Command::Apply {
            image,
            commands,
            output,
        } => {
            let config = config::load_config(&cli.config)?;
            // All phrases must parse before anything is touched
            let parsed = commands
                .iter()
                .map(|text| phrases::parse(text).map(|c| CommandEvent::new(c, text.as_str())))
                .collect::<Result<Vec<_>, _>>()?;
            run_session(&image, &config, Some(&output), move |commands| {
                for event in parsed {
                    commands.submit(event).map_err(std::io::Error::other)?;
                }
                Ok(())
            })?;
        }
        Command::Phrases => {
            output::print_vocabulary(phrases::VOCABULARY, rust_backend::supported_input_extensions());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `image`, run a session fed by `feed` on an input thread, and
/// optionally save the result.
///
/// The session runs on the calling thread until `feed` returns and drops its
/// [`CommandSender`]. Console lines are printed from a separate thread.
fn run_session<F>(
    image: &Path,
    config: &EditorConfig,
    output: Option<&Path>,
    feed: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(CommandSender) -> std::io::Result<()> + Send + 'static,
{
    init_thread_pool(&config.processing);
    let backend = RustBackend::new();
    let base = load_snapshot(&backend, image)?;
    info!(path = %image.display(), width = base.width(), height = base.height(), "loaded");

    let (events_tx, events_rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in events_rx {
            output::print_session_event(&event);
        }
    });

    let (commands, queue) = command_queue(config.session.queue_capacity);
    let reader = std::thread::spawn(move || feed(commands));

    let sink = ConsoleSink::new(events_tx);
    let editor = Editor::with_shade(base, config.crop.shade());
    let mut session = Session::new(editor, sink.clone(), sink);
    let stats = session.run(queue);

    reader.join().map_err(|_| "input thread panicked")??;
    let mut editor = session.into_editor();
    printer.join().map_err(|_| "printer thread panicked")?;

    if editor.crop_session().is_some() {
        // A pending preview is not an edit
        editor.apply(&command::Command::CancelCrop);
        info!("unfinished crop cancelled");
    }

    let saved = match output {
        Some(path) => {
            let path = config.output.resolve_path(path);
            save_snapshot(&backend, editor.current(), &path)?;
            info!(path = %path.display(), "saved");
            Some(path)
        }
        None => None,
    };
    output::print_summary(
        &stats,
        editor.history().len(),
        saved.as_deref().map(|p| (p, editor.current().dimensions())),
    );
    Ok(())
}

/// Diagnostics go to stderr, filtered by `VOX_EDIT_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("VOX_EDIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
