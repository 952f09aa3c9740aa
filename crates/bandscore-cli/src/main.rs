//! bandscore CLI — score practice sections and track progress.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use bandscore_core::model::Section;

mod commands;

#[derive(Parser)]
#[command(
    name = "bandscore",
    version,
    about = "IELTS-style practice scoring and progress tracking"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that can record its result.
#[derive(clap::Args, Clone)]
pub struct RecordArgs {
    /// User the result belongs to
    #[arg(long)]
    pub user: Option<String>,

    /// Store the result in the progress log (requires --user)
    #[arg(long, requires = "user")]
    pub record: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter bandscore.toml
    Init,

    /// Evaluate a writing submission
    Writing {
        /// File containing the essay text
        #[arg(long)]
        file: PathBuf,

        /// Task prompt the essay answers
        #[arg(long, default_value = "")]
        prompt: String,

        /// Minimum word count for the task
        #[arg(long, default_value = "250")]
        min_words: usize,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Mark a reading answer sheet against an answer key
    Reading {
        /// JSON object mapping question id to answer
        #[arg(long)]
        answers: PathBuf,

        /// JSON object mapping question id to correct answer
        #[arg(long)]
        key: PathBuf,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Mark a listening answer sheet against an answer key
    Listening {
        /// JSON object mapping question id to answer
        #[arg(long)]
        answers: PathBuf,

        /// JSON object mapping question id to correct answer
        #[arg(long)]
        key: PathBuf,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Score a speaking attempt (placeholder scoring)
    Speaking {
        /// Task prompt
        #[arg(long, default_value = "")]
        prompt: String,

        /// Recording length in seconds
        #[arg(long, default_value = "0")]
        duration: u32,

        /// File containing a transcript of the recording
        #[arg(long)]
        transcript: Option<PathBuf>,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Record a raw percentage score
    Record {
        #[arg(long)]
        user: String,

        /// listening, reading, writing, or speaking
        #[arg(long)]
        section: Section,

        /// Percentage score, 0 to 100
        #[arg(long, allow_negative_numbers = true)]
        score: f64,
    },

    /// Show a user's progress summary
    Progress {
        #[arg(long)]
        user: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Also list every recorded attempt
        #[arg(long)]
        history: bool,
    },

    /// Overall band from section bands
    Overall {
        /// Section bands, e.g. 6.5 7 5.5 6
        #[arg(required = true, allow_negative_numbers = true)]
        scores: Vec<f64>,
    },
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(
            "bandscore=info"
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Writing {
            file,
            prompt,
            min_words,
            record,
        } => commands::writing::execute(file, prompt, min_words, record, config).await,
        Commands::Reading {
            answers,
            key,
            record,
        } => commands::answers::execute(Section::Reading, answers, key, record, config),
        Commands::Listening {
            answers,
            key,
            record,
        } => commands::answers::execute(Section::Listening, answers, key, record, config),
        Commands::Speaking {
            prompt,
            duration,
            transcript,
            record,
        } => commands::speaking::execute(prompt, duration, transcript, record, config).await,
        Commands::Record {
            user,
            section,
            score,
        } => commands::record::execute(user, section, score, config),
        Commands::Progress {
            user,
            format,
            history,
        } => commands::progress::execute(user, format, history, config),
        Commands::Overall { scores } => commands::overall::execute(scores),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
