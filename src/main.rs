use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cipherforge::error::CfResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference corpus used to build the language model
    #[arg(global = true, long, default_value = "data/corpus/reference.txt")]
    corpus: String,

    /// Cached n-gram table (TSV), used instead of the corpus when present
    #[arg(global = true, long)]
    table: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Encrypt(cmd::encrypt::EncryptArgs),
    Decrypt(cmd::decrypt::DecryptArgs),
    Crack(cmd::crack::CrackArgs),
    Trials(cmd::trials::TrialsArgs),
    Ngrams(cmd::ngrams::NgramsArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so stdout stays clean for ciphertext and JSON.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing CipherForge...");

    // Flags typed after the subcommand live in the subcommand's matches.
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);

    if let Err(e) = dispatch(cli, sub_matches) {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}

fn dispatch(cli: Cli, sub_matches: &clap::ArgMatches) -> CfResult<()> {
    let source = cmd::ModelSource {
        corpus: &cli.corpus,
        table: cli.table.as_deref(),
    };

    match cli.command {
        Commands::Encrypt(args) => cmd::encrypt::run(args),
        Commands::Decrypt(args) => cmd::decrypt::run(args),
        Commands::Crack(args) => cmd::crack::run(args, source, sub_matches),
        Commands::Trials(args) => cmd::trials::run(args, source, sub_matches),
        Commands::Ngrams(args) => cmd::ngrams::run(args, &cli.corpus),
    }
}
