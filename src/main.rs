// wordlist_migrate/src/main.rs
// Entry point for the wordlist-migrate CLI application.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use wordlist_migrate::cli::{Cli, Commands, ExtractArgs, LookupArgs, UploadArgs};
use wordlist_migrate::config::load_env_file;
use wordlist_migrate::error::Result;
#[cfg(feature = "odbc")]
use wordlist_migrate::extractor::run_extract;
use wordlist_migrate::report;
#[cfg(feature = "odbc")]
use wordlist_migrate::source::access::AccessSource;
use wordlist_migrate::store::WordStore;
use wordlist_migrate::store::mongo::MongoStore;
use wordlist_migrate::uploader::run_upload;

#[tokio::main]
async fn main() {
    // Initialize tracing
    let file_appender = tracing_appender::rolling::never(".", "wordlist-migrate.log",);
    let (non_blocking, _guard,) = tracing_appender::non_blocking(file_appender,);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with(fmt::layer().with_writer(std::io::stderr,),)
        .with(fmt::layer().with_writer(non_blocking,).with_ansi(false,),)
        .init();

    let cli = Cli::parse();

    // Failures are reported to the operator and the process still exits normally.
    if let Err(e,) = run(cli,).await {
        error!(kind = e.kind(), "{}", e);
        println!("{}", report::failure_line(&e));
    }
}

async fn run(cli: Cli,) -> Result<(),> {
    match cli.command {
        Commands::Extract(args,) => handle_extract(args,).await,
        Commands::Upload(args,) => {
            load_env(&cli.env_file,)?;
            handle_upload(args,).await
        },
        Commands::Lookup(args,) => {
            load_env(&cli.env_file,)?;
            handle_lookup(args,).await
        },
    }
}

fn load_env(path: &std::path::Path,) -> Result<(),> {
    if load_env_file(path,)? {
        info!("Loaded environment from {}", path.display());
    } else {
        info!("No environment file at {}", path.display());
    }
    Ok((),)
}

#[cfg(feature = "odbc")]
async fn handle_extract(args: ExtractArgs,) -> Result<(),> {
    let config = args.into_config()?;
    let source = AccessSource::new(&config,)?;

    println!("{}", report::extract_started(&config.table));
    let summary = run_extract(&source, &config,).await?;
    report::print_lines(&report::extract_lines(&summary,),);
    Ok((),)
}

#[cfg(not(feature = "odbc"))]
async fn handle_extract(_args: ExtractArgs,) -> Result<(),> {
    Err(wordlist_migrate::error::MigrateError::ConfigurationError(
        "this build has no ODBC support; rebuild with --features odbc".to_string(),
    ),)
}

async fn handle_upload(args: UploadArgs,) -> Result<(),> {
    let config = args.into_config()?;
    info!("Uploading with {:?}", config);

    let summary = run_upload(&config,).await?;
    report::print_lines(&report::upload_lines(&summary,),);
    Ok((),)
}

async fn handle_lookup(args: LookupArgs,) -> Result<(),> {
    let uri = args.store.resolve_uri()?;
    let store = MongoStore::connect(&uri, &args.store.database, &args.store.collection,).await?;

    match (&args.prefix, &args.word,) {
        (Some(prefix,), _,) => {
            let words = store.words_with_prefix(prefix, args.limit,).await?;
            report::print_lines(&report::prefix_lines(prefix, &words,),);
        },
        (None, Some(word,),) => {
            let found = store.contains_word(word,).await?;
            println!("{}", report::lookup_line(word, found));
        },
        (None, None,) => {},
    }
    Ok((),)
}
