//! The cached, symmetry-aware terrain oracle.

use crate::error::MapError;
use crate::symmetry::SymmetryModel;
use crate::window::CoordinateWindow;
use wayfield_core::{Landmarks, TerrainClass, TerrainSensor, Tile};

/// A per-agent cache over raw terrain queries.
///
/// Each storage cell is sensed at most once for a definite result;
/// `Unknown` results are kept only as a placeholder and re-queried on
/// every call until the sensor produces something definite. When a
/// symmetry other than `None` is active, every definite result is
/// written through to the mirror cell as well, halving sensing cost,
/// and an `Unknown` direct result falls back to sensing the mirror.
///
/// Owned exclusively by one agent instance; the cache is never shared.
pub struct TerrainOracle {
    window: CoordinateWindow,
    symmetry: SymmetryModel,
    cache: Vec<Option<TerrainClass>>,
}

impl TerrainOracle {
    /// Build an oracle over the given window and symmetry model.
    pub fn new(window: CoordinateWindow, symmetry: SymmetryModel) -> Self {
        let cells = window.cell_count();
        Self {
            window,
            symmetry,
            cache: vec![None; cells],
        }
    }

    /// Build an oracle for a `width x height` torus directly from the
    /// host's landmarks: the window is anchored at our base and seeded
    /// with every known structure, and the symmetry model is detected
    /// from the base and tower pairs.
    pub fn from_landmarks(
        width: u32,
        height: u32,
        landmarks: &dyn Landmarks,
    ) -> Result<Self, MapError> {
        let own = landmarks.own_base();
        let enemy = landmarks.enemy_base();
        let own_towers = landmarks.own_structures();
        let enemy_towers = landmarks.enemy_structures();

        let mut window = CoordinateWindow::new(width, height, own)?;
        window.extend(enemy);
        for t in own_towers.iter().chain(enemy_towers.iter()) {
            window.extend(*t);
        }

        let symmetry = SymmetryModel::detect(own, enemy, &own_towers, &enemy_towers);
        Ok(Self::new(window, symmetry))
    }

    /// The coordinate window, including any bounds discovered so far.
    pub fn window(&self) -> &CoordinateWindow {
        &self.window
    }

    /// The symmetry model in force.
    pub fn symmetry(&self) -> &SymmetryModel {
        &self.symmetry
    }

    /// Classify `tile`, consulting the cache before the raw sensor.
    ///
    /// Side effect: the window's bounding box is extended whenever an
    /// on-map tile is discovered, for either the tile or its mirror.
    pub fn classify(&mut self, sensor: &dyn TerrainSensor, tile: Tile) -> TerrainClass {
        let idx = self.window.index(tile);
        if let Some(cached) = self.cache[idx] {
            if cached.is_known() {
                return cached;
            }
        }

        let mut class = sensor.sense(tile);
        if class != TerrainClass::OffMap {
            self.window.extend(tile);
        }

        if let Some(mirror) = self.symmetry.mirror(tile) {
            let midx = self.window.index(mirror);
            if class.is_known() {
                self.cache[midx] = Some(class);
                if class != TerrainClass::OffMap {
                    self.window.extend(mirror);
                }
            } else {
                // Direct sense came back unknown; the mirror may be in
                // range even though the tile is not.
                let mirror_class = match self.cache[midx] {
                    Some(c) if c.is_known() => c,
                    _ => {
                        let sensed = sensor.sense(mirror);
                        if sensed != TerrainClass::OffMap {
                            self.window.extend(mirror);
                        }
                        self.cache[midx] = Some(sensed);
                        sensed
                    }
                };
                class = mirror_class;
            }
        }

        self.cache[idx] = Some(class);
        class
    }
}
