//! Map symmetry detection and the mirror transform.

use std::fmt;
use wayfield_core::Tile;

/// The geometric transform relating the two halves of the map.
///
/// Competitive maps are generated by mirroring one side onto the other,
/// so a single detected transform lets one raw terrain query service
/// two tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// No transform maps our base onto the enemy base.
    None,
    /// 180° rotation about the map centre.
    Rotation,
    /// Reflection across a horizontal axis (y mirrored, x fixed).
    FlipY,
    /// Reflection across a vertical axis (x mirrored, y fixed).
    FlipX,
    /// Reflection along the `/` diagonal.
    Slash,
    /// Reflection along the `\` diagonal.
    Backslash,
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Rotation => "rotation",
            Self::FlipY => "flip-y",
            Self::FlipX => "flip-x",
            Self::Slash => "slash",
            Self::Backslash => "backslash",
        };
        write!(f, "{name}")
    }
}

/// The detected symmetry together with the base pair that anchors it.
///
/// Computed once per agent and immutable afterwards. All transforms are
/// expressed through the coordinate sums of the two bases, so they work
/// directly on offset logical coordinates without knowing the map origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymmetryModel {
    own_base: Tile,
    enemy_base: Tile,
    symmetry: Symmetry,
}

impl SymmetryModel {
    /// Detect the map symmetry from the two bases and, if present, the
    /// first tower pair.
    ///
    /// The axis and diagonal reflections are tried first: each holds only
    /// when the bases actually share the corresponding coordinate, so a
    /// match is meaningful on its own. The 180° rotation maps any base
    /// pair onto itself by construction, so it is accepted last and only
    /// when the tower pair (when both sides have towers) corroborates it.
    pub fn detect(
        own_base: Tile,
        enemy_base: Tile,
        own_towers: &[Tile],
        enemy_towers: &[Tile],
    ) -> Self {
        let probe = Self {
            own_base,
            enemy_base,
            symmetry: Symmetry::None,
        };

        let reflections = [
            Symmetry::FlipY,
            Symmetry::FlipX,
            Symmetry::Slash,
            Symmetry::Backslash,
        ];
        for s in reflections {
            if probe.transform(own_base, s) == Some(enemy_base) {
                return Self { symmetry: s, ..probe };
            }
        }

        let rotation_corroborated = match (own_towers.first(), enemy_towers.first()) {
            (Some(&ours), Some(&theirs)) => {
                probe.transform(ours, Symmetry::Rotation) == Some(theirs)
            }
            _ => true,
        };
        if rotation_corroborated {
            return Self {
                symmetry: Symmetry::Rotation,
                ..probe
            };
        }

        probe
    }

    /// The detected transform.
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// The mirror image of `tile` under the detected transform, or
    /// `None` when no symmetry was found.
    pub fn mirror(&self, tile: Tile) -> Option<Tile> {
        self.transform(tile, self.symmetry)
    }

    fn transform(&self, t: Tile, s: Symmetry) -> Option<Tile> {
        let sx = self.own_base.x + self.enemy_base.x;
        let sy = self.own_base.y + self.enemy_base.y;
        match s {
            Symmetry::None => None,
            Symmetry::Rotation => Some(Tile::new(sx - t.x, sy - t.y)),
            Symmetry::FlipY => Some(Tile::new(t.x, sy - t.y)),
            Symmetry::FlipX => Some(Tile::new(sx - t.x, t.y)),
            Symmetry::Slash => Some(Tile::new(t.y + (sx - sy) / 2, t.x + (sy - sx) / 2)),
            Symmetry::Backslash => {
                let m = (sx + sy) / 2;
                Some(Tile::new(m - t.y, m - t.x))
            }
        }
    }
}
