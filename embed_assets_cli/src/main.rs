//! Command-line front end for `embed_assets`.
//!
//! Exit codes: 0 on success, 2 for usage errors, 3 when the patterns
//! matched no files, 1 for any other failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use embed_assets::{Codec, Config, Encoding, Layout, OrderBy};

/// Bundle static files into a generated Rust source file.
#[derive(Debug, Parser)]
#[command(name = "embed-assets", version, about)]
struct Cli {
    /// Name of the generated `pub mod`.
    #[arg(short, long, default_value = "assets")]
    module: String,

    /// Path the generated source is written to.
    #[arg(short, long, default_value = "assets.rs", value_name = "PATH")]
    out: PathBuf,

    /// Bundle member order.
    #[arg(long, value_enum, default_value = "name")]
    order: OrderArg,

    /// Compression codec.
    #[arg(long, value_enum, default_value = "gzip")]
    codec: CodecArg,

    /// How the compressed bytes appear in the generated source.
    #[arg(long, value_enum, default_value = "base64")]
    encoding: EncodingArg,

    /// Whether assets are compressed together or one by one.
    #[arg(long, value_enum, default_value = "packed")]
    layout: LayoutArg,

    /// Compression level (gzip 0-9, zstd 1-21); codec default if unset.
    #[arg(long)]
    level: Option<i32>,

    /// Column the embedded literal wraps at.
    #[arg(long, default_value_t = embed_assets::DEFAULT_LINE_WIDTH)]
    width: usize,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Glob patterns selecting the files to bundle.
    #[arg(required = true, value_name = "PATTERN")]
    patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Byte-wise ascending by path.
    Name,
    /// Oldest modification time first.
    Mtime,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CodecArg {
    Gzip,
    Zstd,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    /// A base64 string, decoded on first access.
    Base64,
    /// A hex-escaped byte-string literal.
    Bytes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// One compressed blob for the whole bundle.
    Packed,
    /// One compressed blob per file.
    PerFile,
}

impl From<OrderArg> for OrderBy {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Name => OrderBy::Name,
            OrderArg::Mtime => OrderBy::ModTime,
        }
    }
}

impl From<CodecArg> for Codec {
    fn from(arg: CodecArg) -> Self {
        match arg {
            CodecArg::Gzip => Codec::Gzip,
            CodecArg::Zstd => Codec::Zstd,
        }
    }
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Base64 => Encoding::Base64,
            EncodingArg::Bytes => Encoding::ByteString,
        }
    }
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Packed => Layout::Packed,
            LayoutArg::PerFile => Layout::PerFile,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    log::debug!("bundling {:?} into {}", cli.patterns, cli.out.display());
    let config = Config::new(cli.patterns.iter().cloned())
        .module(cli.module.as_str())
        .output(cli.out.clone())
        .order_by(cli.order.into())
        .codec(cli.codec.into())
        .encoding(cli.encoding.into())
        .layout(cli.layout.into())
        .line_width(cli.width);
    let config = match cli.level {
        Some(level) => config.level(level),
        None => config,
    };
    config.write()?;
    Ok(())
}

fn init_logger(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

// Clap claims exit code 2 for usage errors; 3 marks a bundle that would
// have been empty so wrapper scripts can tell it from hard failures.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<embed_assets::Error>() {
        Some(embed_assets::Error::EmptyBundle) => 3,
        _ => 1,
    }
}
