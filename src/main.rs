use anyhow::Context;
use bvh_skeleton_probe::export::write_name_map;
use bvh_skeleton_probe::report::Report;
use bvh_skeleton_probe::{load_skeleton_from_file, suggest_name_map};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print the joint tree of a BVH file and suggest a joint name map onto canonical GMR names.
#[derive(Debug, Clone, Parser)]
#[command(name = "bvh-skeleton-probe", version)]
pub struct Args {
    /// Path to a BVH file.
    bvh: PathBuf,
    /// Write the suggested map to this file (`.json` for JSON, otherwise a Python module).
    #[arg(long)]
    write_map: Option<PathBuf>,
}

fn init_logging() {
    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_target(false)
        .compact();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .event_format(format)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let skeleton = load_skeleton_from_file(&args.bvh)
        .with_context(|| format!("probing {}", args.bvh.display()))?;
    let name_map = suggest_name_map(&skeleton.hierarchy.order);

    print!("{}", Report::new(&skeleton, &name_map));

    if let Some(path) = &args.write_map {
        write_name_map(path, &name_map)?;
        println!("\n[Saved] Suggested map -> {}", path.display());
    }
    Ok(())
}
