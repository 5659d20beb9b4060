//! Shared scene for the demo binaries.
//!
//! Scatters crates and wall segments over a world-space map, keeps a start
//! and a goal free on opposite sides, and lays the result out as rows of
//! [`Tile`]s with the top row (highest `y`) first.

use jumpgrid_core::{Point, Size, Vec2};
use jumpgrid_paths::{GridError, GridMap, MapDescriptor, Obstacle};
use rand::{RngExt, SeedableRng};

pub const WIDTH: f64 = 60.0;
pub const HEIGHT: f64 = 22.0;
pub const CELL_SIZE: f64 = 1.0;
const OBSTACLES: usize = 28;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    Path,
    Start,
    Goal,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Path => '*',
            Tile::Start => 'S',
            Tile::Goal => 'G',
        }
    }
}

pub struct Scene {
    pub grid: GridMap,
    pub obstacles: Vec<Obstacle>,
    pub start: Vec2,
    pub goal: Vec2,
}

impl Scene {
    /// Same seed, same scene.
    pub fn generate(seed: u64) -> Result<Self, GridError> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let desc = MapDescriptor::new(Vec2::ZERO, Size::new(WIDTH, HEIGHT), CELL_SIZE);
        let mut grid = GridMap::new(&desc)?;

        let obstacles: Vec<Obstacle> = (0..OBSTACLES)
            .map(|_| {
                let size = Size::new(rng.random_range(3.0..9.0), rng.random_range(1.0..2.5));
                let pos = Vec2::new(rng.random_range(0.0..WIDTH), rng.random_range(0.0..HEIGHT));
                let rotation = if rng.random_range(0..2) == 0 { 0.0 } else { 90.0 };
                Obstacle::new(pos, size)
                    .with_anchor(Vec2::CENTER)
                    .with_rotation(rotation)
            })
            .collect();
        grid.mark_obstacles(&obstacles);

        let start = Vec2::new(1.5, rng.random_range(1.0..HEIGHT - 1.0));
        let goal = Vec2::new(WIDTH - 1.5, rng.random_range(1.0..HEIGHT - 1.0));
        let ends: Vec<Point> = [start, goal].into_iter().filter_map(|w| grid.cell_of(w)).collect();
        grid.unmark_cells(ends);

        Ok(Self {
            grid,
            obstacles,
            start,
            goal,
        })
    }

    /// The map with `path` drawn over it, top row first.
    pub fn tiles(&self, path: &[Point]) -> Vec<Vec<Tile>> {
        let bounds = self.grid.bounds();
        let start = self.grid.cell_of(self.start);
        let goal = self.grid.cell_of(self.goal);
        (bounds.min.y..bounds.max.y)
            .rev()
            .map(|y| {
                (bounds.min.x..bounds.max.x)
                    .map(|x| {
                        let p = Point::new(x, y);
                        if Some(p) == start {
                            Tile::Start
                        } else if Some(p) == goal {
                            Tile::Goal
                        } else if path.contains(&p) {
                            Tile::Path
                        } else if self.grid.is_fixed_obstacle(p) {
                            Tile::Wall
                        } else {
                            Tile::Floor
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpgrid_paths::MovementMode;

    #[test]
    fn scenes_are_reproducible() {
        let a = Scene::generate(3).unwrap();
        let b = Scene::generate(3).unwrap();
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.start, b.start);
        assert_eq!(a.grid.obstacle_count(), b.grid.obstacle_count());
    }

    #[test]
    fn endpoints_are_kept_clear() {
        for seed in 0..20 {
            let scene = Scene::generate(seed).unwrap();
            assert!(!scene.grid.has_obstacle(scene.start));
            assert!(!scene.grid.has_obstacle(scene.goal));
        }
    }

    #[test]
    fn tiles_put_high_rows_first() {
        let scene = Scene::generate(11).unwrap();
        let path = scene
            .grid
            .find_path(scene.start, scene.goal, MovementMode::WithDiagonals)
            .unwrap();
        let tiles = scene.tiles(&path);
        assert_eq!(tiles.len(), HEIGHT as usize);
        assert!(tiles.iter().all(|row| row.len() == WIDTH as usize));

        let start = scene.grid.cell_of(scene.start).unwrap();
        let row = tiles.len() - 1 - start.y as usize;
        assert_eq!(tiles[row][start.x as usize], Tile::Start);
    }
}
