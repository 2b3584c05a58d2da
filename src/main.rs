use std::path::PathBuf;

use clap::Parser;
use md2docx::Config;

#[derive(Parser)]
#[command(name = "md2docx")]
#[command(about = "Convert Markdown files to Word documents")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output .docx file
    output: PathBuf,

    /// TOML file overriding fonts and rule width
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Load config
    let config = match &cli.config {
        Some(path) => {
            log::debug!("Using config from: {}", path.display());
            Config::load(path)
        }
        None => {
            log::debug!("Using default config");
            Ok(Config::compiled_default())
        }
    };

    // Convert and save
    let result = config.and_then(|config| md2docx::convert_file(&cli.input, &cli.output, &config));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!(
        "Successfully converted {} to {}",
        cli.input.display(),
        cli.output.display()
    );
}
