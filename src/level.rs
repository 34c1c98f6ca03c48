//! Level loading
//!
//! A level directory holds three JSON files:
//! - `collisions.json`: row-major tile grid, required
//! - `l_Gems.json`: row-major tile grid, optional
//! - `enemies.json`: list of spawn records, optional
//!
//! `LevelData` is the raw file content; `Level::build` validates it and
//! turns it into obstacles and spawn lists. Every error surfaces here,
//! before the simulation starts.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GEM_TILE_ID, SOLID_TILE_IDS, TILE_SIZE};
use crate::sim::enemy::EnemyKind;
use crate::sim::geom::Rect;
use crate::sim::obstacle::{ObstacleSet, StaticObstacle};

pub const COLLISIONS_FILE: &str = "collisions.json";
pub const GEMS_FILE: &str = "l_Gems.json";
pub const ENEMIES_FILE: &str = "enemies.json";

/// Row-major tile ids
pub type TileGrid = Vec<Vec<i32>>;

/// Error type for level construction
#[derive(Debug)]
pub enum LevelError {
    /// File could not be read
    Io(String),
    /// File content is not the expected JSON
    Parse(String),
    /// Content parsed but cannot form a playable level
    Validation(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(msg) => write!(f, "I/O error: {}", msg),
            LevelError::Parse(msg) => write!(f, "Parse error: {}", msg),
            LevelError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e.to_string())
    }
}

/// One enemy record from `enemies.json`
///
/// Keys are matched case-insensitively for the spellings level tools emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type", alias = "Type", alias = "TYPE")]
    pub kind: String,
    #[serde(alias = "X")]
    pub x: f32,
    #[serde(alias = "Y")]
    pub y: f32,
    #[serde(
        rename = "turningDistance",
        alias = "TurningDistance",
        alias = "turningdistance",
        alias = "turning_distance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub turning_distance: Option<f32>,
}

/// Raw level files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelData {
    pub collisions: TileGrid,
    pub gems: Option<TileGrid>,
    pub enemies: Vec<EnemySpawn>,
}

impl LevelData {
    /// Parse already-read file contents. Only the collision grid is required;
    /// an unreadable optional layer is logged and treated as absent.
    pub fn from_json_strs(
        collisions: &str,
        gems: Option<&str>,
        enemies: Option<&str>,
    ) -> Result<Self, LevelError> {
        let collisions: TileGrid = serde_json::from_str(collisions)
            .map_err(|e| LevelError::Parse(format!("{}: {}", COLLISIONS_FILE, e)))?;

        let gems = gems.and_then(|json| match serde_json::from_str::<TileGrid>(json) {
            Ok(grid) => Some(grid),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", GEMS_FILE, e);
                None
            }
        });

        let enemies = match enemies.map(serde_json::from_str::<Vec<EnemySpawn>>) {
            Some(Ok(list)) => list,
            Some(Err(e)) => {
                log::warn!("Ignoring malformed {}: {}", ENEMIES_FILE, e);
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Self {
            collisions,
            gems,
            enemies,
        })
    }

    /// Read a level directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LevelError> {
        let dir = dir.as_ref();
        let collisions_path = dir.join(COLLISIONS_FILE);
        let collisions = std::fs::read_to_string(&collisions_path)
            .map_err(|e| LevelError::Io(format!("{}: {}", collisions_path.display(), e)))?;

        let gems = read_optional(dir, GEMS_FILE);
        let enemies = read_optional(dir, ENEMIES_FILE);

        log::info!("Loading level from {}", dir.display());
        Self::from_json_strs(&collisions, gems.as_deref(), enemies.as_deref())
    }
}

fn read_optional(dir: &Path, name: &str) -> Option<String> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("Optional layer {} not loaded: {}", path.display(), e);
            None
        }
    }
}

/// A validated enemy spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub turning_distance: Option<f32>,
}

/// A playable level: static geometry plus what to spawn
#[derive(Debug, Clone)]
pub struct Level {
    pub obstacles: ObstacleSet,
    /// Level extent in world units
    pub size: Vec2,
    pub gem_spawns: Vec<Vec2>,
    pub enemy_spawns: Vec<EnemyPlacement>,
}

impl Level {
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LevelError> {
        Self::build(&LevelData::load_dir(dir)?)
    }

    pub fn build(data: &LevelData) -> Result<Self, LevelError> {
        let rows = data.collisions.len();
        let cols = data.collisions.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(LevelError::Validation("collision grid is empty".to_string()));
        }
        if let Some((row, r)) = data.collisions.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(LevelError::Validation(format!(
                "collision grid row {} has {} tiles, expected {}",
                row,
                r.len(),
                cols
            )));
        }

        let obstacles = ObstacleSet::new(
            tiles_matching(&data.collisions, |id| SOLID_TILE_IDS.contains(&id))
                .map(|(col, row)| StaticObstacle::tile(col, row, TILE_SIZE))
                .collect(),
        );

        let gem_spawns: Vec<Vec2> = data
            .gems
            .as_ref()
            .map(|grid| {
                tiles_matching(grid, |id| id == GEM_TILE_ID)
                    .map(|(col, row)| Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE))
                    .collect()
            })
            .unwrap_or_default();
        if data.gems.is_none() {
            log::warn!("Level has no gem layer");
        }

        let mut enemy_spawns = Vec::with_capacity(data.enemies.len());
        for (i, spawn) in data.enemies.iter().enumerate() {
            if !spawn.x.is_finite() || !spawn.y.is_finite() {
                return Err(LevelError::Validation(format!(
                    "enemy {} ({}) has a non-finite position",
                    i, spawn.kind
                )));
            }
            if let Some(d) = spawn.turning_distance {
                if !(d.is_finite() && d >= 0.0) {
                    return Err(LevelError::Validation(format!(
                        "enemy {} ({}) has an invalid turning distance {}",
                        i, spawn.kind, d
                    )));
                }
            }
            let Some(kind) = EnemyKind::from_tag(&spawn.kind) else {
                log::warn!("Skipping enemy {} with unknown type {:?}", i, spawn.kind);
                continue;
            };
            log::debug!("Enemy {:?} at ({}, {})", kind, spawn.x, spawn.y);
            enemy_spawns.push(EnemyPlacement {
                kind,
                pos: Vec2::new(spawn.x, spawn.y),
                turning_distance: spawn.turning_distance,
            });
        }

        let size = Vec2::new(cols as f32 * TILE_SIZE, rows as f32 * TILE_SIZE);
        log::info!(
            "Level built: {}x{} units, {} obstacles, {} gems, {} enemies",
            size.x,
            size.y,
            obstacles.len(),
            gem_spawns.len(),
            enemy_spawns.len()
        );

        Ok(Self {
            obstacles,
            size,
            gem_spawns,
            enemy_spawns,
        })
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.size)
    }
}

/// (col, row) of every cell whose id satisfies `pred`, row-major
fn tiles_matching<'a>(
    grid: &'a TileGrid,
    pred: impl Fn(i32) -> bool + Copy + 'a,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    grid.iter().enumerate().flat_map(move |(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(move |&(_, &id)| pred(id))
            .map(move |(col, _)| (col, row))
    })
}
