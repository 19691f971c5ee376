//! imgconv - convert an image between BMP, PPM and JPEG, chosen by file extension.
//!
//! Exit codes: 0 success, 1 usage error, 2 unsupported input format,
//! 3 unsupported output format, 4 loading failed, 5 saving failed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use imgconv::{BitmapError, Codec, Format};
use tracing::{debug, info};

/// Convert an image between formats, chosen by file extension
#[derive(Parser, Debug)]
#[command(name = "imgconv")]
#[command(version)]
#[command(after_help = "SUPPORTED FORMATS:
    .bmp   24-bit uncompressed BMP
    .ppm   binary PPM (P6)
    .jpg   JPEG (also .jpeg), written at quality 90")]
struct Cli {
    /// Input image (.bmp, .ppm, .jpg or .jpeg)
    in_file: PathBuf,

    /// Output image (.bmp, .ppm, .jpg or .jpeg)
    out_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum Failure {
    #[error("Unknown format of the input file")]
    UnknownInput,
    #[error("Unknown format of the output file")]
    UnknownOutput,
    #[error("No codec available for {0:?} input")]
    NoInputCodec(Format),
    #[error("No codec available for {0:?} output")]
    NoOutputCodec(Format),
    #[error("Loading failed: {0}")]
    Load(#[source] BitmapError),
    #[error("Saving failed: {0}")]
    Save(#[source] BitmapError),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::UnknownInput | Failure::NoInputCodec(_) => 2,
            Failure::UnknownOutput | Failure::NoOutputCodec(_) => 3,
            Failure::Load(_) => 4,
            Failure::Save(_) => 5,
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgconv={log_level}").into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn codec_for(
    path: &Path,
    unknown: Failure,
    missing: fn(Format) -> Failure,
) -> Result<Codec, Failure> {
    let format = Format::from_path(path).ok_or(unknown)?;
    debug!(path = %path.display(), ?format, "format from extension");
    format.codec().ok_or(missing(format))
}

fn convert(cli: &Cli) -> Result<(), Failure> {
    let input = codec_for(&cli.in_file, Failure::UnknownInput, Failure::NoInputCodec)?;
    let output = codec_for(&cli.out_file, Failure::UnknownOutput, Failure::NoOutputCodec)?;

    let image = (input.load)(&cli.in_file).map_err(Failure::Load)?;
    info!(width = image.width(), height = image.height(), "loaded");

    (output.save)(&cli.out_file, &image).map_err(Failure::Save)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match convert(&cli) {
        Ok(()) => {
            println!("Successfully converted");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::from(failure.exit_code())
        }
    }
}
