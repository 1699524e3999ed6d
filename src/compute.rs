//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  The only side effect is
//! the RNG injected into `init_state`.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Effect, EffectStatus, GameEvent, GameState, GameStatus, Hazard, HeldKeys, Player, PlayerPose,
    Projectile, ProjectileStatus, Score,
};
use crate::geometry::Vector2i;

/// Input for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: HeldKeys,
    /// Fire key-down events since the previous frame, each consumed once.
    pub fire_presses: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state.  Hazard positions come from `rng` so
/// callers control determinism (seeded RNG in tests).
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let viewport = config.viewport();
    let radius = config.hazard_radius;

    // Keep every hazard fully inside the viewport so its first bounce check
    // starts from a legal position.
    let hazards = (0..config.hazard_count)
        .map(|_| {
            let center = Vector2i::new(
                rng.gen_range(radius..=viewport.width - radius),
                rng.gen_range(radius..=viewport.height - radius),
            );
            Hazard::new(center, radius, config.hazard_speed)
        })
        .collect();

    log::info!(
        "new game: {}x{} viewport, {} hazards",
        viewport.width,
        viewport.height,
        config.hazard_count
    );

    GameState {
        player: Player::new(
            config.player_start,
            config.player_size.width,
            config.player_size.height,
        ),
        hazards,
        projectiles: Vec::new(),
        effects: Vec::new(),
        score: Score::default(),
        status: GameStatus::Running,
        frame: 0,
        viewport,
        events: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire one projectile along the player's facing.
pub fn fire(state: &GameState, config: &GameConfig) -> GameState {
    let mut projectiles = state.projectiles.clone();
    projectiles.extend(Projectile::fire(
        &state.player,
        config.projectile_speed,
        config.projectile_size.width,
        config.projectile_size.height,
    ));
    GameState {
        projectiles,
        ..state.clone()
    }
}

pub fn move_player(state: &GameState, held: &HeldKeys, config: &GameConfig) -> GameState {
    let mut player = state.player.clone();
    player.move_by(held, config.player_speed, &state.viewport);
    GameState {
        player,
        ..state.clone()
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Panics if `state` is already terminal: the frame loop must stop once the
/// game is over.
pub fn tick(state: &GameState, input: &FrameInput, config: &GameConfig) -> GameState {
    assert!(
        state.status == GameStatus::Running,
        "tick called on a finished game (frame {})",
        state.frame
    );

    let mut next = state.clone();
    next.events.clear();
    next.frame = state.frame + 1;

    // ── 1. Input: fire, then move ────────────────────────────────────────────
    for _ in 0..input.fire_presses {
        next = fire(&next, config);
    }
    next = move_player(&next, &input.held, config);

    // ── 2. Terminal check: player ↔ any hazard ───────────────────────────────
    let player_bounds = next.player.body.bounds;
    if next
        .hazards
        .iter()
        .any(|h| h.body.bounds.overlaps(&player_bounds))
    {
        next.status = GameStatus::Terminal;
        next.player.pose = PlayerPose::Defeated;
        next.events.push(GameEvent::GameOver {
            score: next.score.value(),
        });
        log::info!(
            "game over on frame {} with score {}",
            next.frame,
            next.score.value()
        );
        return next;
    }

    // ── 3. Destructive collision: projectiles ↔ hazards ──────────────────────
    // Hazards outer, projectiles inner, both in stored order.  The first live
    // projectile touching a hazard takes it; neither can be reused this frame.
    let mut dead_hazards = vec![false; next.hazards.len()];
    let mut dead_projectiles = vec![false; next.projectiles.len()];

    for (hi, hazard) in next.hazards.iter().enumerate() {
        for (pi, projectile) in next.projectiles.iter().enumerate() {
            if dead_projectiles[pi] || !projectile.body.bounds.overlaps(&hazard.body.bounds) {
                continue;
            }
            dead_hazards[hi] = true;
            dead_projectiles[pi] = true;

            let center = hazard.body.center();
            next.score.increment();
            next.effects.push(Effect::new(
                center,
                config.effect_size.width,
                config.effect_size.height,
                config.effect_lifetime_frames,
            ));
            next.events.push(GameEvent::HazardDestroyed { center });
            log::debug!(
                "hazard {hi} destroyed by projectile {pi} at ({}, {})",
                center.x,
                center.y
            );
            break;
        }
    }

    if dead_hazards.iter().any(|&d| d) {
        next.player.pose = PlayerPose::Cheer;
    }

    // ── 4. Prune tombstoned entities ─────────────────────────────────────────
    let mut marks = dead_hazards.into_iter();
    next.hazards.retain(|_| !marks.next().unwrap_or(false));
    let mut marks = dead_projectiles.into_iter();
    next.projectiles.retain(|_| !marks.next().unwrap_or(false));

    // ── 5. Advance survivors ─────────────────────────────────────────────────
    let viewport = next.viewport;
    for hazard in &mut next.hazards {
        hazard.advance(&viewport);
    }
    next.projectiles
        .retain_mut(|p| p.advance(&viewport) == ProjectileStatus::Alive);

    // ── 6. Effects ───────────────────────────────────────────────────────────
    next.effects
        .retain_mut(|e| e.advance() == EffectStatus::Alive);

    log::trace!(
        "frame {}: {} hazards, {} projectiles, {} effects",
        next.frame,
        next.hazards.len(),
        next.projectiles.len(),
        next.effects.len()
    );

    next
}
