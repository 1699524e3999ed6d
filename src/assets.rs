//! Sprite sheet: maps symbolic sprites to terminal glyphs.
//!
//! A sheet can be loaded from JSON to restyle the game.  A sheet that is
//! missing any sprite is rejected at startup.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{Direction, PlayerPose};
use crate::scene::SpriteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    White,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    Grey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub text: String,
    pub tint: Tint,
}

impl Glyph {
    fn new(text: &str, tint: Tint) -> Self {
        Self {
            text: text.to_string(),
            tint,
        }
    }
}

#[derive(Debug)]
pub enum AssetError {
    Io { path: String, source: std::io::Error },
    Parse(serde_json::Error),
    MissingSprite(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read sprite sheet {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid sprite sheet JSON: {err}"),
            Self::MissingSprite(key) => write!(f, "sprite sheet has no entry for {key:?}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::MissingSprite(_) => None,
        }
    }
}

/// Sheet key for a sprite, e.g. `player.3`, `player.cheer`, `effect.flipped`.
pub fn sprite_key(sprite: &SpriteId) -> String {
    match sprite {
        SpriteId::Player {
            pose: PlayerPose::Cheer,
            ..
        } => "player.cheer".to_string(),
        SpriteId::Player {
            pose: PlayerPose::Defeated,
            ..
        } => "player.defeated".to_string(),
        SpriteId::Player { facing, .. } => format!("player.{facing}"),
        SpriteId::Hazard => "hazard".to_string(),
        SpriteId::Projectile { facing } => format!("projectile.{facing}"),
        SpriteId::Effect { flipped: false } => "effect".to_string(),
        SpriteId::Effect { flipped: true } => "effect.flipped".to_string(),
    }
}

/// Every sprite the renderer may ask for.
pub fn required_sprites() -> Vec<SpriteId> {
    let mut all = Vec::new();
    for facing in 0..Direction::PRINCIPAL.len() {
        all.push(SpriteId::Player {
            facing,
            pose: PlayerPose::Normal,
        });
        all.push(SpriteId::Projectile { facing });
    }
    all.push(SpriteId::Player {
        facing: 0,
        pose: PlayerPose::Cheer,
    });
    all.push(SpriteId::Player {
        facing: 0,
        pose: PlayerPose::Defeated,
    });
    all.push(SpriteId::Hazard);
    all.push(SpriteId::Effect { flipped: false });
    all.push(SpriteId::Effect { flipped: true });
    all
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheet {
    sprites: BTreeMap<String, Glyph>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        // Orientation order matches `Direction::PRINCIPAL`.
        let player = ["[→]", "[↗]", "[↑]", "[↖]", "[←]", "[↙]", "[↓]", "[↘]"];
        let beam = ["─", "╱", "│", "╲", "─", "╱", "│", "╲"];

        let mut sprites = BTreeMap::new();
        for (i, (p, b)) in player.iter().zip(beam.iter()).enumerate() {
            sprites.insert(format!("player.{i}"), Glyph::new(p, Tint::White));
            sprites.insert(format!("projectile.{i}"), Glyph::new(b, Tint::Cyan));
        }
        sprites.insert("player.cheer".into(), Glyph::new("\\o/", Tint::Yellow));
        sprites.insert("player.defeated".into(), Glyph::new("x_x", Tint::Grey));
        sprites.insert("hazard".into(), Glyph::new("●", Tint::Red));
        sprites.insert("effect".into(), Glyph::new("✶", Tint::Yellow));
        sprites.insert("effect.flipped".into(), Glyph::new("✷", Tint::Magenta));
        Self { sprites }
    }
}

impl SpriteSheet {
    pub fn from_json_str(json: &str) -> Result<Self, AssetError> {
        let sheet: SpriteSheet = serde_json::from_str(json).map_err(AssetError::Parse)?;
        sheet.check_complete()?;
        Ok(sheet)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let sheet = Self::from_json_str(&json)?;
        log::info!("loaded sprite sheet from {}", path.display());
        Ok(sheet)
    }

    fn check_complete(&self) -> Result<(), AssetError> {
        for sprite in required_sprites() {
            let key = sprite_key(&sprite);
            if !self.sprites.contains_key(&key) {
                return Err(AssetError::MissingSprite(key));
            }
        }
        Ok(())
    }

    pub fn glyph(&self, sprite: &SpriteId) -> Option<&Glyph> {
        self.sprites.get(&sprite_key(sprite))
    }
}
