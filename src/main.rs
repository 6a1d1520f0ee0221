use clap::{Parser, Subcommand};
use cloudphoto::archive::{self, BucketStatus};
use cloudphoto::config::{self, ArchiveConfig};
use cloudphoto::storage::S3Store;
use cloudphoto::{generate, output};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("CLOUDPHOTO_RELEASE") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("CLOUDPHOTO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Album name plus a local directory.
#[derive(clap::Args, Clone)]
struct TransferArgs {
    /// Album name (key prefix in the bucket)
    #[arg(short, long)]
    album: String,

    /// Local directory
    #[arg(short, long, default_value = ".")]
    path: PathBuf,
}

#[derive(Parser)]
#[command(name = "cloudphoto")]
#[command(about = "Photo archive in S3-compatible object storage")]
#[command(long_about = "\
Photo archive in S3-compatible object storage

The bucket is the data source. Key prefixes are albums, objects under them
are photos. `mksite` publishes a static website listing every album.

Bucket layout:

  bucket/
  ├── vacation/a.jpg          # album \"vacation\", photo \"a.jpg\"
  ├── family/c.jpg            # album \"family\"
  ├── index.html              # generated by mksite
  ├── album1.html             # one page per album, sorted by name
  └── error.html

Run 'cloudphoto init' once to store credentials and create the bucket.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ~/.config/cloudphoto/cloudphotorc)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Archive(ArchiveCommand),
    /// Store credentials and make sure the bucket exists
    #[command(visible_alias = "i")]
    Init,
}

/// Commands that run against an already configured bucket.
#[derive(Subcommand)]
enum ArchiveCommand {
    /// Upload the photos of a local directory into an album
    #[command(visible_alias = "u")]
    Upload(TransferArgs),
    /// Download an album into a local directory
    #[command(visible_alias = "d")]
    Download(TransferArgs),
    /// List albums, or the photos of one album
    #[command(visible_alias = "l")]
    List {
        /// Album to list photos of
        #[arg(short, long)]
        album: Option<String>,
    },
    /// Delete an album, or one photo of it
    #[command(visible_alias = "del")]
    Delete {
        /// Album name
        #[arg(short, long)]
        album: String,

        /// Photo to delete instead of the whole album
        #[arg(short, long)]
        photo: Option<String>,
    },
    /// Generate and publish the static website
    #[command(visible_alias = "mk")]
    Mksite,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `error` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Command::Init => init(&config_path),
        Command::Archive(command) => run_command(command, &config_path),
    }
}

/// Run an archive command against the configured bucket.
fn run_command(command: ArchiveCommand, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load_config(config_path)?;
    let store = S3Store::connect(&settings)?;

    match command {
        ArchiveCommand::Upload(args) => {
            let report = archive::upload_dir(&store, &args.path, &args.album)?;
            output::print_upload_report(&report, &args.album);
        }
        ArchiveCommand::Download(args) => {
            let written = archive::download(&store, &args.album, &args.path)?;
            output::print_download_output(&args.album, &written, &args.path);
        }
        ArchiveCommand::List { album } => {
            let names = archive::list(&store, album.as_deref())?;
            output::print_names(&names);
        }
        ArchiveCommand::Delete { album, photo } => {
            let deleted = archive::delete(&store, &album, photo.as_deref())?;
            output::print_delete_output(&deleted);
        }
        ArchiveCommand::Mksite => {
            let report = generate::generate(&store, &settings.website_domain)?;
            output::print_site_report(&report);
        }
    }

    Ok(())
}

/// Prompt for credentials, save them, and bootstrap the bucket.
///
/// The saved config is removed again when the credentials are rejected.
fn init(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let access_key_id = prompt("aws_access_key_id")?;
    let secret_access_key = prompt("aws_secret_access_key")?;
    let bucket = prompt("bucket")?;

    let settings = ArchiveConfig::new(&bucket, &access_key_id, &secret_access_key);
    let store = S3Store::connect(&settings)?;
    match archive::init_archive(&store, config_path, &settings)? {
        BucketStatus::Created => println!("Created bucket {}", settings.bucket),
        BucketStatus::Existing => println!("Using bucket {}", settings.bucket),
    }

    println!("Config written to {}", config_path.display());
    Ok(())
}

fn prompt(name: &str) -> io::Result<String> {
    print!("{name}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
