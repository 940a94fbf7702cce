use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use vless_outbound::Outbound;

#[derive(Parser, Debug)]
#[command(name = "vless2json")]
#[command(about = "Convert vless:// links into Xray outbound JSON", long_about = None)]
struct Args {
    /// One or more "vless://..." links
    #[arg(required = true, value_name = "URI")]
    uris: Vec<String>,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// Print JSON to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Stops at the first failing link.
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    for link in &args.uris {
        let outbound = vless_outbound::convert(link)?;
        if args.stdout {
            println!("{}", outbound.to_json_pretty()?);
        } else {
            let path = write_outbound(&args.outdir, &outbound)?;
            println!("Saved: {}", path.display());
        }
    }
    Ok(())
}

fn write_outbound(outdir: &Path, outbound: &Outbound) -> Result<PathBuf> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("cannot create {}", outdir.display()))?;
    let path = outdir.join(outbound.file_name());
    std::fs::write(&path, outbound.to_json_pretty()?)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("wrote outbound {:?} to {}", outbound.tag, path.display());
    Ok(path)
}
