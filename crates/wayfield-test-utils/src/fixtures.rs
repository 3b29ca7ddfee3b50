//! Terrain and landmark fixtures.

use wayfield_core::{Landmarks, Structures, TerrainClass, TerrainSensor, Tile};

/// A terrain sensor backed by an ASCII picture.
///
/// Each line is one row (y), each column one x coordinate:
///
/// - `.` traversable ground
/// - `#` impassable void
/// - `?` unknown (out of sensor range)
///
/// Tiles outside the picture are off-map. The picture lives at logical
/// origin `(0, 0)`, which is what the test windows are anchored to.
pub struct AsciiMap {
    width: i32,
    height: i32,
    cells: Vec<TerrainClass>,
}

impl AsciiMap {
    /// Parse a picture. Panics on unknown glyphs or ragged rows, which
    /// are test-authoring bugs.
    pub fn parse(picture: &str) -> Self {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        let mut cells = Vec::with_capacity((width * height) as usize);
        for row in &rows {
            assert_eq!(row.len() as i32, width, "ragged row in ascii map");
            for glyph in row.chars() {
                cells.push(match glyph {
                    '.' => TerrainClass::Normal,
                    '#' => TerrainClass::Void,
                    '?' => TerrainClass::Unknown,
                    other => panic!("unknown terrain glyph {other:?}"),
                });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Picture width in tiles.
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Picture height in tiles.
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Rewrite one cell, e.g. to reveal previously unknown terrain
    /// between ticks.
    pub fn set(&mut self, x: i32, y: i32, class: TerrainClass) {
        assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        self.cells[(y * self.width + x) as usize] = class;
    }
}

impl TerrainSensor for AsciiMap {
    fn sense(&self, tile: Tile) -> TerrainClass {
        if tile.x < 0 || tile.x >= self.width || tile.y < 0 || tile.y >= self.height {
            return TerrainClass::OffMap;
        }
        self.cells[(tile.y * self.width + tile.x) as usize]
    }
}

/// Fixed base and structure locations.
pub struct FixedLandmarks {
    pub own_base: Tile,
    pub enemy_base: Tile,
    pub own_structures: Vec<Tile>,
    pub enemy_structures: Vec<Tile>,
}

impl FixedLandmarks {
    /// Landmarks with just the two bases.
    pub fn bases(own: Tile, enemy: Tile) -> Self {
        Self {
            own_base: own,
            enemy_base: enemy,
            own_structures: Vec::new(),
            enemy_structures: Vec::new(),
        }
    }
}

impl Landmarks for FixedLandmarks {
    fn own_base(&self) -> Tile {
        self.own_base
    }

    fn enemy_base(&self) -> Tile {
        self.enemy_base
    }

    fn own_structures(&self) -> Structures {
        self.own_structures.iter().copied().collect()
    }

    fn enemy_structures(&self) -> Structures {
        self.enemy_structures.iter().copied().collect()
    }
}
