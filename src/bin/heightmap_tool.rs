//! Heightmap tool: loads a heightmap program and prints the grid it builds.
//!
//! Usage: cargo run --bin heightmap_tool -- <PROGRAM> [OPTIONS]
//!
//! Options:
//!   --json             Read programs as JSON documents instead of binary
//!   --base <PROGRAM>   Build PROGRAM as a shadow receiver of this base program
//!   --config <FILE>    Codec limits as JSON (default: built-in limits)
//!   --default <H>      Default height of the base heightmap (default: 0)

use std::path::Path;
use std::process::ExitCode;

use relief::core::Result;
use relief::heightmap::Heightmap;
use relief::program::{CodecConfig, HeightmapProgram};

fn main() -> ExitCode {
    relief::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(program_path) = args.get(1).filter(|a| !a.starts_with("--")) else {
        eprintln!("Usage: heightmap_tool <program> [--json] [--base <program>] [--config <file>] [--default <h>]");
        return ExitCode::FAILURE;
    };

    match run(program_path, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(program_path: &str, args: &[String]) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let default_height = parse_u8_arg(args, "--default").unwrap_or(0);
    let config = match parse_str_arg(args, "--config") {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };

    let program = load_program(Path::new(program_path), json, &config)?;
    log::info!("Loaded {} instructions from {}", program.len(), program_path);
    print_program(&program);

    let heightmap = match parse_str_arg(args, "--base") {
        Some(base_path) => {
            let base_program = load_program(Path::new(&base_path), json, &config)?;
            log::info!("Building base heightmap from {}", base_path);
            let base = base_program.build(default_height)?;
            program.build_shadow_receiver(&base)?
        }
        None => program.build(default_height)?,
    };

    print_heightmap(&heightmap);
    Ok(())
}

fn load_program(path: &Path, json: bool, config: &CodecConfig) -> Result<HeightmapProgram> {
    if json {
        let text = std::fs::read_to_string(path)?;
        HeightmapProgram::from_json(&text, config)
    } else {
        HeightmapProgram::load(path, config)
    }
}

fn print_program(program: &HeightmapProgram) {
    println!("=== Program ===");
    for (i, instruction) in program.iter().enumerate() {
        println!("{:3}: {}", i, instruction);
    }
    println!();
}

fn print_heightmap(heightmap: &Heightmap) {
    let bounds = heightmap.bounds();
    println!("=== Heightmap ===");
    println!("Bounds:  {:?} .. {:?}", bounds.min, bounds.max);
    println!("Default: {}", heightmap.default_height());
    for row in heightmap.debug_rows() {
        println!("{}", row);
    }
}

fn parse_u8_arg(args: &[String], flag: &str) -> Option<u8> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
