//! Tunable game constants.
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Vector2i, Viewport};

/// Largest accepted viewport side, keeping all in-game coordinates far from `i32` limits.
pub const MAX_VIEWPORT_SIDE: i32 = 1 << 20;

/// Width and height of an entity's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Hazards placed at start.  Destroyed ones are never replaced.
    pub hazard_count: usize,
    /// Pixels per frame on each axis.
    pub player_speed: i32,
    pub hazard_speed: i32,
    pub projectile_speed: i32,
    pub effect_lifetime_frames: u32,
    pub target_frame_rate: u32,

    pub player_start: Vector2i,
    pub player_size: Size,
    pub hazard_radius: i32,
    pub projectile_size: Size,
    pub effect_size: Size,

    /// How long the final frame stays up after game over.
    pub game_over_hold_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1100,
            viewport_height: 650,
            hazard_count: 5,
            player_speed: 5,
            hazard_speed: 5,
            projectile_speed: 5,
            effect_lifetime_frames: 100,
            target_frame_rate: 50,

            player_start: Vector2i::new(300, 200),
            player_size: Size::new(90, 90),
            hazard_radius: 10,
            projectile_size: Size::new(20, 20),
            effect_size: Size::new(60, 60),

            game_over_hold_ms: 1000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Parse(serde_json::Error),
    NonPositive { field: &'static str, value: i64 },
    BadSize { field: &'static str, size: Size },
    TooLarge { field: &'static str, value: i64, limit: i64 },
    PlayerOutOfBounds { start: Vector2i },
    HazardTooLarge { radius: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::BadSize { field, size } => write!(
                f,
                "{field} must be positive and fit inside the viewport, got {}x{}",
                size.width, size.height
            ),
            Self::TooLarge {
                field,
                value,
                limit,
            } => write!(f, "{field} must be at most {limit}, got {value}"),
            Self::PlayerOutOfBounds { start } => write!(
                f,
                "player start ({}, {}) does not fit inside the viewport",
                start.x, start.y
            ),
            Self::HazardTooLarge { radius } => {
                write!(f, "hazard radius {radius} does not fit inside the viewport")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars: [(&'static str, i64); 8] = [
            ("viewportWidth", self.viewport_width.into()),
            ("viewportHeight", self.viewport_height.into()),
            ("playerSpeed", self.player_speed.into()),
            ("hazardSpeed", self.hazard_speed.into()),
            ("projectileSpeed", self.projectile_speed.into()),
            ("effectLifetimeFrames", self.effect_lifetime_frames.into()),
            ("targetFrameRate", self.target_frame_rate.into()),
            ("hazardRadius", self.hazard_radius.into()),
        ];
        for (field, value) in scalars {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("viewportWidth", self.viewport_width),
            ("viewportHeight", self.viewport_height),
        ] {
            if value > MAX_VIEWPORT_SIDE {
                return Err(ConfigError::TooLarge {
                    field,
                    value: value.into(),
                    limit: MAX_VIEWPORT_SIDE.into(),
                });
            }
        }
        // No step may be longer than the shorter viewport side
        let max_speed = self.viewport_width.min(self.viewport_height);
        for (field, value) in [
            ("playerSpeed", self.player_speed),
            ("hazardSpeed", self.hazard_speed),
            ("projectileSpeed", self.projectile_speed),
        ] {
            if value > max_speed {
                return Err(ConfigError::TooLarge {
                    field,
                    value: value.into(),
                    limit: max_speed.into(),
                });
            }
        }

        let sizes = [
            ("playerSize", self.player_size),
            ("projectileSize", self.projectile_size),
            ("effectSize", self.effect_size),
        ];
        for (field, size) in sizes {
            if !size.is_positive()
                || size.width > self.viewport_width
                || size.height > self.viewport_height
            {
                return Err(ConfigError::BadSize { field, size });
            }
        }

        // Checked in i64: the start point is still untrusted here
        let half_w = i64::from(self.player_size.width / 2);
        let half_h = i64::from(self.player_size.height / 2);
        let (x, y) = (i64::from(self.player_start.x), i64::from(self.player_start.y));
        if x - half_w < 0
            || x - half_w + i64::from(self.player_size.width) > i64::from(self.viewport_width)
            || y - half_h < 0
            || y - half_h + i64::from(self.player_size.height)
                > i64::from(self.viewport_height)
        {
            return Err(ConfigError::PlayerOutOfBounds {
                start: self.player_start,
            });
        }
        let shorter_side = i64::from(self.viewport_width.min(self.viewport_height));
        if 2 * i64::from(self.hazard_radius) > shorter_side {
            return Err(ConfigError::HazardTooLarge {
                radius: self.hazard_radius,
            });
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Starting bounding box of the player.
    pub fn player_rect(&self) -> Rect {
        Rect::from_center(
            self.player_start,
            self.player_size.width,
            self.player_size.height,
        )
    }

    /// Time budget for one frame at `target_frame_rate`.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.target_frame_rate.max(1)
    }

    pub fn game_over_hold(&self) -> Duration {
        Duration::from_millis(self.game_over_hold_ms)
    }
}
