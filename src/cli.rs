use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the sequencing workflow utilities.
#[derive(Parser, Debug)]
#[command(
    name = "seqops",
    about = "Command-line utilities for sequencing data-processing workflows",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy pipeline result files matching glob patterns
    Copy(CopyOpts),
    /// Download FASTQ files listed in a run manifest via Aspera
    Fetch(FetchOpts),
    /// Verify FASTQ files against manifest MD5 checksums
    Verify(VerifyOpts),
    /// Stage FASTQ folders into a pipeline's expected layout
    Stage(StageOpts),
    /// Rename FASTQ files using manifest aliases
    Rename(RenameOpts),
    /// Execute shell commands from a file, logging failures
    Run(RunOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for log file naming.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Copy(_) => "copy",
            Self::Fetch(_) => "fetch",
            Self::Verify(_) => "verify",
            Self::Stage(_) => "stage",
            Self::Rename(_) => "rename",
            Self::Run(_) => "run",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `copy` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CopyOpts {
    /// Source directory where the result files are located
    pub src_dir: PathBuf,

    /// Target directory where the files will be copied to
    pub target_dir: PathBuf,

    /// Text file containing file patterns, one per line
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Additional file patterns (e.g. '*_peaks*', '*.bigWig')
    #[arg(long, num_args = 1..)]
    pub rules: Vec<String>,

    /// Copy without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Options for the `fetch` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct FetchOpts {
    /// Run manifest TSV with a fastq_aspera column
    pub manifest: PathBuf,

    /// Aspera private key file passed to ascp -i
    #[arg(long, env = "SEQOPS_ASPERA_KEY")]
    pub key_file: PathBuf,

    /// Number of parallel transfer workers
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Restrict transfers to these experiment aliases (GSM accessions)
    #[arg(long, num_args = 1..)]
    pub experiments: Vec<String>,

    /// Transfer rate limit passed to ascp -l
    #[arg(long, default_value = "300m")]
    pub rate_limit: String,

    /// Directory to download into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Options for the `verify` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct VerifyOpts {
    /// Run manifest TSV with experiment_alias and fastq_md5 columns
    pub manifest: PathBuf,

    /// Folder containing the .fastq.gz files to check
    pub fastq_dir: PathBuf,
}

/// Options for the `stage` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StageOpts {
    /// Source directory containing the run folders
    pub src_dir: PathBuf,

    /// Glob pattern selecting folders to stage
    pub pattern: String,

    /// Target directory for the staged layout
    pub target_dir: PathBuf,

    /// Prefix for each staged folder name
    #[arg(long, default_value = "Project_")]
    pub prefix: String,
}

/// Options for the `rename` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RenameOpts {
    /// Run manifest TSV with run_accession, study_alias and experiment_alias columns
    pub manifest: PathBuf,

    /// Directory containing the .fastq.gz files to rename
    pub fastq_dir: PathBuf,
}

/// Options for the `run` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RunOpts {
    /// File containing one shell command per line
    pub command_file: PathBuf,

    /// File to append failure entries to
    #[arg(long, default_value = "errors.log")]
    pub log_file: PathBuf,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
