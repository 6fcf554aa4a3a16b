//! Block Stacking Path Sandbox
//!
//! An interactive sandbox for stacking unit cubes on an integer ground grid,
//! with a teaching tool: pick two cube corners of the structure and the tool
//! reports the shortest distance along cube edges, the number of distinct
//! shortest routes, and can display every one of them in a 3D viewer.

mod visualization;

use clap::{Parser, Subcommand};

use stackpath::{graph, persistence, solver, world};
use world::Point;

/// Stacks blocks and answers shortest-path questions about their edges.
#[derive(Parser)]
#[command(name = "stackpath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Edit the scene in the interactive 3D editor (saved on exit).
    Edit,
    /// View the saved scene; with endpoints, walk through every shortest path.
    View {
        /// First corner, as X,Y,Z (e.g. "-0.5,0.0,-0.5").
        #[arg(long, value_parser = parse_point)]
        from: Option<Point>,
        /// Second corner, as X,Y,Z.
        #[arg(long, value_parser = parse_point)]
        to: Option<Point>,
    },
    /// Print the shortest distance and path count between two corners.
    Count {
        #[arg(long, value_parser = parse_point)]
        from: Point,
        #[arg(long, value_parser = parse_point)]
        to: Point,
    },
    /// Print every shortest path between two corners.
    Paths {
        #[arg(long, value_parser = parse_point)]
        from: Point,
        #[arg(long, value_parser = parse_point)]
        to: Point,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Edit) | None => run_edit(),
        Some(Command::View { from, to }) => {
            if from.is_some() != to.is_some() {
                eprintln!("Both --from and --to are needed to show paths; ignoring the one given.");
            }
            run_view(from.zip(to));
        }
        Some(Command::Count { from, to }) => run_count(from, to),
        Some(Command::Paths { from, to }) => run_paths(from, to),
    }
}

/// Parses an "X,Y,Z" corner coordinate, e.g. "0.5,-0.5,1.5".
fn parse_point(s: &str) -> Result<Point, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z, got '{s}'"));
    }
    let coord = |index: usize| -> Result<f32, String> {
        parts[index]
            .trim()
            .parse()
            .map_err(|_| format!("invalid coordinate '{}'", parts[index]))
    };
    Ok((coord(0)?, coord(1)?, coord(2)?))
}

/// Formats one path as a line of corner positions.
fn format_path(path: &[Point]) -> String {
    path.iter()
        .map(|&(x, y, z)| format!("({x:.1}, {y:.1}, {z:.1})"))
        .collect::<Vec<String>>()
        .join(" -> ")
}

/// Opens the editor on the saved scene (or an empty one) and saves on exit.
fn run_edit() {
    let world = persistence::load().unwrap_or_default();
    println!("Controls: WASD move cursor, Space place, U undo, Y redo");
    let world = visualization::edit(world);

    if let Err(e) = persistence::save(&world) {
        eprintln!("Failed to save scene: {}", e);
    } else {
        println!("Saved {} blocks", world.blocks().len());
        println!("Wrote scene.bin and scene.txt");
    }
}

/// Displays the saved scene, optionally with its shortest paths.
fn run_view(endpoints: Option<(Point, Point)>) {
    match persistence::load() {
        Some(world) => {
            println!("Loaded {} blocks", world.blocks().len());
            if endpoints.is_some() {
                println!("Controls: Left/Right switch between shortest paths");
            }
            visualization::display(world, endpoints);
        }
        None => missing_scene(),
    }
}

/// Prints the shortest distance and path count between two corners.
fn run_count(from: Point, to: Point) {
    let Some(world) = persistence::load() else {
        missing_scene();
        return;
    };
    let graph = graph::build_graph(world.blocks());
    let result = solver::shortest_path_count(&graph, from, to);

    match result.distance {
        Some(distance) => {
            println!("distance: {} edge-hops", distance);
            println!("shortest paths: {}", result.count);
        }
        None => println!("unreachable: corner not on the structure, or not connected"),
    }
}

/// Prints every shortest path between two corners, one per line.
fn run_paths(from: Point, to: Point) {
    let Some(world) = persistence::load() else {
        missing_scene();
        return;
    };
    let graph = graph::build_graph(world.blocks());
    let paths = solver::all_shortest_paths(&graph, from, to);

    if paths.is_empty() {
        println!("no paths: corner not on the structure, or not connected");
        return;
    }
    println!("{} shortest paths of {} edge-hops:", paths.len(), paths[0].len() - 1);
    for path in &paths {
        println!("{}", format_path(path));
    }
}

fn missing_scene() {
    eprintln!("No scene.bin found. Run 'stackpath edit' first.");
}
