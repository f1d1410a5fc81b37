//! Terrain Mesh Generation
//!
//! Generates a Perlin heightmap terrain with marching cubes and writes it as
//! an OBJ file:
//! 1. Build the generation config (command line or JSON file)
//! 2. Generate the mesh
//! 3. Print mesh statistics
//! 4. Export to OBJ
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin terrain_mesh -- output/terrain.obj 64 1337 0.0
//! cargo run --release --bin terrain_mesh -- output/terrain.obj terrain.json
//! RUST_LOG=debug cargo run --release --bin terrain_mesh
//! ```

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process;
use std::str::FromStr;

use instant::Instant;

use isomesh::{write_obj, GenerationConfig, MeshGenerator};

fn parse_arg<T: FromStr>(args: &[String], index: usize, name: &str, default: T) -> T {
    match args.get(index) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Invalid {}: '{}'", name, raw);
                process::exit(2);
            }
        },
    }
}

fn build_config(args: &[String]) -> GenerationConfig {
    if let Some(path) = args.get(2).filter(|a| a.ends_with(".json")) {
        return match GenerationConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                process::exit(1);
            }
        };
    }

    let defaults = GenerationConfig::default();
    GenerationConfig::new(parse_arg(args, 2, "points per axis", defaults.points_per_axis))
        .with_seed(parse_arg(args, 3, "seed", defaults.seed))
        .with_iso_level(parse_arg(args, 4, "iso level", defaults.iso_level))
}

fn main() {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          isomesh Terrain Generation");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!(
            "Usage: {} <output.obj> [points_per_axis | config.json] [seed] [iso_level]",
            args[0]
        );
        println!();
        println!("Using default: output/terrain.obj");
    }
    let output_path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "output/terrain.obj".to_string());

    if let Some(parent) = Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // =========================================================================
    // Step 1: Configuration
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Configuration                                       │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let config = build_config(&args);
    println!("  Points per axis: {}", config.points_per_axis);
    println!("  Seed:            {}", config.seed);
    println!("  Iso level:       {}", config.iso_level);
    println!("  Cell size:       {}", config.cell_size);
    println!("  Parallel:        {}", config.parallel);
    println!(
        "  Terrain:         base {} / amplitude {} / frequency {}",
        config.terrain.base_height, config.terrain.amplitude, config.terrain.frequency
    );
    println!("  Max triangles:   {}", config.max_triangles());
    println!();

    // =========================================================================
    // Step 2: Generate
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Generate Mesh                                       │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    let mesh = match MeshGenerator::terrain(config).generate() {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Error generating mesh: {}", e);
            process::exit(1);
        }
    };
    let generate_time = start.elapsed();
    println!("  Generation time: {:.3}s", generate_time.as_secs_f64());
    println!();

    // =========================================================================
    // Step 3: Statistics
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Mesh Statistics                                     │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let stats = &mesh.stats;
    println!("  Triangles:       {}", stats.triangle_count);
    println!("  Vertices:        {}", stats.vertex_count);
    println!("  Surface area:    {:.2}", stats.surface_area);
    println!(
        "  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
        stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z,
        stats.bbox_max.x, stats.bbox_max.y, stats.bbox_max.z
    );
    println!("  Degenerate:      {}", stats.degenerate_count);
    println!("  Non-finite:      {}", stats.non_finite_count);
    println!(
        "  Buffer bytes:    {} vertex / {} index",
        mesh.buffers.vertex_bytes().len(),
        mesh.buffers.index_bytes().len()
    );
    println!();

    // =========================================================================
    // Step 4: Export
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 4: Export OBJ                                          │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    let result = File::create(&output_path)
        .map_err(isomesh::IsoError::from)
        .and_then(|file| write_obj(BufWriter::new(file), &mesh.triangles));
    if let Err(e) = result {
        eprintln!("Error writing '{}': {}", output_path, e);
        process::exit(1);
    }
    log::info!("wrote {} triangles to {}", mesh.triangle_count(), output_path);

    println!("  Output file:     {}", output_path);
    println!("  Write time:      {:.3}s", start.elapsed().as_secs_f64());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
