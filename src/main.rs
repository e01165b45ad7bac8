//! naksha - load, edit and convert robot vacuum map captures.
//!
//! Usage:
//!   naksha map.bin -v
//!   naksha map.bin --set-floor 10,10,40,30 --output edited.bin
//!   naksha map.bin --set-wall 2,2,5,5 --png map.png
//!
//! Enable debug logging to see per-block decode details:
//!   RUST_LOG=debug naksha map.bin

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use naksha::{edit, render, MapModel, Rect, Result};

/// Load, edit and convert a captured robot vacuum map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the map capture (input)
    map: PathBuf,

    /// Mark a rectangular area as unexplored.
    /// Takes four comma-separated cell coordinates x1,y1,x2,y2
    #[arg(short = 'u', long = "set-unexplored", value_name = "X1,Y1,X2,Y2")]
    set_unexplored: Vec<Rect>,

    /// Mark a rectangular area as floor
    #[arg(short = 'f', long = "set-floor", value_name = "X1,Y1,X2,Y2")]
    set_floor: Vec<Rect>,

    /// Mark a rectangle border as wall
    #[arg(short = 'w', long = "set-wall", value_name = "X1,Y1,X2,Y2")]
    set_wall: Vec<Rect>,

    /// File path to write the map as a PNG
    #[arg(short = 'p', long)]
    png: Option<PathBuf>,

    /// File path to write the re-encoded map
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print additional info about the decoded map
    #[arg(short, long)]
    verbose: bool,
}

fn print_summary(map: &MapModel) {
    let grid = map.grid();
    let (unexplored, floor, wall, reserved) = grid.counts();

    println!("Successfully loaded map:");
    println!("    Blocks:     {}", map.blocks().len());
    println!("    Grid:       {}x{} cells", grid.width(), grid.height());
    println!("    Offset:     ({}, {})", grid.left(), grid.top());
    println!(
        "    Cells:      {} unexplored, {} floor, {} wall, {} reserved",
        unexplored, floor, wall, reserved
    );
    if let Some(t) = map.transform() {
        println!(
            "    Transform:  origin ({:.3}, {:.3}) m, {:.3} m/cell",
            t.origin_x, t.origin_y, t.resolution
        );
    }
    if let Some(pose) = map.robot_pose() {
        println!(
            "    Robot:      ({}, {}) mm, {} deg",
            pose.x, pose.y, pose.angle
        );
    }
    if let Some(pose) = map.charger_pose() {
        println!(
            "    Charger:    ({}, {}) mm, {} deg",
            pose.x, pose.y, pose.angle
        );
    }
    if let Some(path) = map.cleaned_path() {
        println!("    Cleaned:    {} path points", path.len());
    }
    if let Some(path) = map.goto_path() {
        println!("    Goto:       {} path points", path.len());
    }
    if !map.zones().is_empty() {
        println!("    Zones:      {}", map.zones().len());
    }
    if !map.virtual_walls().is_empty() {
        println!("    Walls:      {} virtual segments", map.virtual_walls().len());
    }
}

fn run(args: &Args) -> Result<()> {
    let bytes = std::fs::read(&args.map)?;
    let mut map = MapModel::load(&bytes)?;

    if args.verbose {
        print_summary(&map);
    }

    for &rect in &args.set_unexplored {
        edit::set_unexplored(map.grid_mut(), rect)?;
    }
    for &rect in &args.set_floor {
        edit::set_floor(map.grid_mut(), rect)?;
    }
    for &rect in &args.set_wall {
        edit::set_wall(map.grid_mut(), rect)?;
    }

    if let Some(path) = &args.png {
        render::render(map.grid()).save(path)?;
        log::info!("wrote raster to {}", path.display());
    }

    if let Some(path) = &args.output {
        std::fs::write(path, map.serialize()?)?;
        log::info!("wrote re-encoded map to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
