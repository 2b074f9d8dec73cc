use anyhow::{Context, Result};
use clap::Parser;
use fixed2csv::{
    convert_file, convert_reader, load_layout, write_csv, ConvertOptions, StringRule,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert a fixed-width flat file to CSV using a column layout file"
)]
struct Args {
    /// Layout file, one `name,size,type` entry per line
    #[arg(short, long)]
    layout: PathBuf,
    /// Fixed-width input file
    #[arg(short, long)]
    input: PathBuf,
    /// CSV output file; written to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Accept whitespace inside `string` fields instead of rejecting the line
    #[arg(long)]
    allow_inner_whitespace: bool,
}

fn main() -> Result<()> {
    // logs go to stderr so stdout stays pure CSV
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = ConvertOptions {
        string_rule: if args.allow_inner_whitespace {
            StringRule::AllowInnerWhitespace
        } else {
            StringRule::SingleToken
        },
    };

    match &args.output {
        Some(out) => {
            let summary = convert_file(&args.input, out, &args.layout, options)?;
            info!(
                "Processed {} records -> {}",
                summary.records,
                summary.output.display()
            );
        }
        None => {
            let layout = load_layout(&args.layout)?;
            let input = File::open(&args.input)
                .with_context(|| format!("Failed to open input file: {:?}", args.input))?;
            let records = convert_reader(BufReader::new(input), &layout, options)
                .with_context(|| format!("Failed to convert {:?}", args.input))?;
            write_csv(io::stdout().lock(), &layout, &records)?;
            info!("Processed {} records", records.len());
        }
    }

    Ok(())
}
