use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "metastrip",
    version,
    about = "Removes metadata from image files (EXIF, IPTC, XMP)"
)]
struct Cli {
    /// The input image file
    input_file: PathBuf,

    /// The output image file (will overwrite if exists)
    output_file: PathBuf,

    /// Preserve color profile
    #[arg(long)]
    keep_color_profile: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging: one `<timestamp> - <LEVEL> - <message>` line per event.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .init();

    match metastrip::strip(&cli.input_file, &cli.output_file, cli.keep_color_profile) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
