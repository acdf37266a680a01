use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use zenbmp::{BitmapError, DecodeRequest, Unstoppable};

#[derive(FromArgs, Debug)]
/// Read a 24-bit BMP, optionally transform it, and write it back out
struct Args {
    /// input BMP file
    #[argh(positional)]
    input: PathBuf,

    /// output BMP file
    #[argh(positional)]
    output: PathBuf,

    /// exchange the red and blue channel of every pixel
    #[argh(switch)]
    swap_red_blue: bool,

    /// halve width and height by nearest-neighbour sampling
    #[argh(switch)]
    downscale: bool,
}

fn run(args: &Args) -> Result<(), BitmapError> {
    let data = std::fs::read(&args.input)?;
    let mut bitmap = DecodeRequest::new(&data).decode(Unstoppable)?;

    if args.swap_red_blue {
        bitmap.swap_red_blue();
    }
    if args.downscale {
        bitmap.downscale_half()?;
    }

    // Encode fully before the output file is created.
    let encoded = bitmap.encode(Unstoppable)?;
    std::fs::write(&args.output, encoded)?;
    Ok(())
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", args.input.display());
            ExitCode::FAILURE
        }
    }
}
