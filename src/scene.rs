//! What to draw for one frame.
//!
//! The simulation never draws anything itself.  `build_scene` turns a
//! `GameState` into an ordered list of draw commands in world coordinates;
//! a renderer decides how they look.

use crate::entities::{Effect, GameState, Hazard, Player, PlayerPose, Projectile};
use crate::geometry::{Rect, Vector2i, Viewport};

/// Symbolic sprite reference, resolved against a `SpriteSheet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player { facing: usize, pose: PlayerPose },
    Hazard,
    Projectile { facing: usize },
    Effect { flipped: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Hud,
    Banner,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Sprite { sprite: SpriteId, rect: Rect },
    Text { text: String, at: Vector2i, style: TextStyle },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    pub game_over: bool,
}

/// Borrowed view over any entity, so sprite lookup is one `match`.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Hazard(&'a Hazard),
    Projectile(&'a Projectile),
    Effect(&'a Effect),
}

impl EntityRef<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.body.bounds,
            EntityRef::Hazard(h) => h.body.bounds,
            EntityRef::Projectile(p) => p.body.bounds,
            EntityRef::Effect(e) => e.bounds,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            // Facing is never idle, so the index is always present.
            EntityRef::Player(p) => SpriteId::Player {
                facing: p.facing.sprite_index().unwrap_or(0),
                pose: p.pose,
            },
            EntityRef::Hazard(_) => SpriteId::Hazard,
            EntityRef::Projectile(p) => SpriteId::Projectile {
                facing: p.heading.sprite_index().unwrap_or(0),
            },
            EntityRef::Effect(e) => SpriteId::Effect { flipped: e.flipped },
        }
    }
}

pub const GAME_OVER_TEXT: &str = "GameOver";

/// Draw order: hazards, projectiles, effects, player, then text on top.
pub fn build_scene(state: &GameState) -> Scene {
    let viewport = state.viewport;

    let entities = state
        .hazards
        .iter()
        .map(EntityRef::Hazard)
        .chain(
            state
                .projectiles
                .iter()
                // A projectile that has left the viewport is never shown.
                .filter(|p| viewport.contains(&p.body.bounds))
                .map(EntityRef::Projectile),
        )
        .chain(
            state
                .effects
                .iter()
                .filter(|e| e.remaining_life > 0)
                .map(EntityRef::Effect),
        )
        .chain(std::iter::once(EntityRef::Player(&state.player)));

    let mut commands: Vec<DrawCommand> = entities
        .map(|e| DrawCommand::Sprite {
            sprite: e.sprite(),
            rect: e.bounds(),
        })
        .collect();

    commands.push(DrawCommand::Text {
        text: format!("Score: {}", state.score.value()),
        at: Vector2i::new(50, viewport.height - 50),
        style: TextStyle::Hud,
    });

    let game_over = state.is_terminal();
    if game_over {
        commands.push(DrawCommand::Text {
            text: GAME_OVER_TEXT.to_string(),
            at: Vector2i::new(viewport.width / 2 - 150, viewport.height / 2),
            style: TextStyle::Banner,
        });
    }

    Scene {
        viewport,
        commands,
        game_over,
    }
}
