//! Prints a random obstacle map and the paths found in both movement modes.
//!
//! Run: cargo run --bin ascii [seed]

use std::error::Error;

use crossterm::style::Stylize;
use jumpgrid_demos::{Scene, Tile};
use jumpgrid_paths::{JumpPlanner, MovementMode, SearchOutcome};

fn print_tile(tile: Tile) {
    let glyph = tile.glyph();
    match tile {
        Tile::Floor => print!("{}", glyph.dark_grey()),
        Tile::Wall => print!("{}", glyph.grey().on_dark_grey()),
        Tile::Path => print!("{}", glyph.cyan().bold()),
        Tile::Start => print!("{}", glyph.green().bold()),
        Tile::Goal => print!("{}", glyph.red().bold()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 42,
    };
    let scene = Scene::generate(seed)?;
    println!(
        "seed {seed}: {} obstacles covering {} cells",
        scene.obstacles.len(),
        scene.grid.obstacle_count()
    );

    let mut planner = JumpPlanner::new();
    for mode in [MovementMode::WithDiagonals, MovementMode::Orthogonal] {
        let outcome = planner.search(&scene.grid, scene.start, scene.goal, mode)?;
        println!();
        match &outcome {
            SearchOutcome::Found(route) => println!(
                "{mode:?}: {} cells, {} jump points, {} iterations",
                route.cells().len(),
                route.jump_points().len(),
                planner.iterations()
            ),
            other => println!("{mode:?}: no path ({other:?})"),
        }
        for row in scene.tiles(outcome.cells()) {
            for tile in row {
                print_tile(tile);
            }
            println!();
        }
    }
    Ok(())
}
