use anyhow::Result;
use clap::Parser;
use fixed2csv::load_layout;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Print a parsed layout file and its total line width")]
struct Args {
    /// Layout file to inspect
    layout: PathBuf,
    /// Emit the layout as pretty JSON instead of the column list
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let layout = load_layout(&args.layout)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        println!("{}", layout);
        println!("columns: {}, width: {}", layout.len(), layout.total_width());
    }

    Ok(())
}
