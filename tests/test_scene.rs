use bomb_buster::assets::*;
use bomb_buster::entities::*;
use bomb_buster::geometry::*;
use bomb_buster::scene::*;

fn make_state() -> GameState {
    GameState {
        player: Player::new(Vector2i::new(300, 200), 90, 90),
        hazards: vec![Hazard::new(Vector2i::new(800, 400), 10, 5)],
        projectiles: Vec::new(),
        effects: Vec::new(),
        score: Score::default(),
        status: GameStatus::Running,
        frame: 0,
        viewport: Viewport::new(1100, 650),
        events: Vec::new(),
    }
}

fn sprites(scene: &Scene) -> Vec<SpriteId> {
    scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Sprite { sprite, .. } => Some(*sprite),
            _ => None,
        })
        .collect()
}

fn texts(scene: &Scene) -> Vec<String> {
    scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

// ── build_scene ───────────────────────────────────────────────────────────────

#[test]
fn scene_draws_entities_then_player_then_hud() {
    let mut s = make_state();
    let p = Projectile::fire(&s.player, 5, 20, 20).unwrap();
    s.projectiles.push(p);
    s.effects.push(Effect::new(Vector2i::new(500, 500), 60, 60, 10));

    let scene = build_scene(&s);
    assert_eq!(
        sprites(&scene),
        vec![
            SpriteId::Hazard,
            SpriteId::Projectile { facing: 0 },
            SpriteId::Effect { flipped: false },
            SpriteId::Player {
                facing: 0,
                pose: PlayerPose::Normal
            },
        ]
    );
    assert_eq!(texts(&scene), vec!["Score: 0".to_string()]);
    assert!(!scene.game_over);
}

#[test]
fn sprite_rects_come_from_entity_bounds() {
    let s = make_state();
    let scene = build_scene(&s);
    let DrawCommand::Sprite { rect, .. } = &scene.commands[0] else {
        panic!("first command should be the hazard sprite");
    };
    assert_eq!(*rect, s.hazards[0].body.bounds);
}

#[test]
fn projectile_outside_viewport_is_not_drawn() {
    let mut s = make_state();
    let mut p = Projectile::fire(&s.player, 5, 20, 20).unwrap();
    p.body.bounds = Rect::new(1095, 100, 20, 20);
    s.projectiles.push(p);
    let scene = build_scene(&s);
    assert!(!sprites(&scene)
        .iter()
        .any(|sp| matches!(sp, SpriteId::Projectile { .. })));
}

#[test]
fn player_sprite_follows_facing_and_pose() {
    let mut s = make_state();
    s.player.facing = Direction::Up;
    s.player.pose = PlayerPose::Cheer;
    let scene = build_scene(&s);
    assert!(sprites(&scene).contains(&SpriteId::Player {
        facing: 2,
        pose: PlayerPose::Cheer
    }));
}

#[test]
fn game_over_adds_banner() {
    let mut s = make_state();
    s.status = GameStatus::Terminal;
    s.score.increment();
    let scene = build_scene(&s);
    assert!(scene.game_over);
    assert_eq!(
        texts(&scene),
        vec!["Score: 1".to_string(), GAME_OVER_TEXT.to_string()]
    );
}

#[test]
fn entity_ref_dispatches_sprite_and_bounds() {
    let s = make_state();
    assert_eq!(EntityRef::Hazard(&s.hazards[0]).sprite(), SpriteId::Hazard);
    assert_eq!(
        EntityRef::Player(&s.player).bounds(),
        s.player.body.bounds
    );

    let mut e = Effect::new(Vector2i::new(10, 10), 4, 4, 2);
    e.flipped = true;
    assert_eq!(
        EntityRef::Effect(&e).sprite(),
        SpriteId::Effect { flipped: true }
    );
    assert_eq!(EntityRef::Effect(&e).bounds(), e.bounds);

    let mut p = Projectile::fire(&s.player, 5, 20, 20).unwrap();
    p.heading = Direction::DownLeft;
    assert_eq!(
        EntityRef::Projectile(&p).sprite(),
        SpriteId::Projectile {
            facing: Direction::DownLeft.sprite_index().unwrap()
        }
    );
}

// ── SpriteSheet ───────────────────────────────────────────────────────────────

#[test]
fn default_sheet_covers_every_sprite() {
    let sheet = SpriteSheet::default();
    for sprite in required_sprites() {
        assert!(sheet.glyph(&sprite).is_some(), "missing {sprite:?}");
    }
}

#[test]
fn cheer_and_defeat_ignore_facing() {
    let cheer_right = SpriteId::Player {
        facing: 0,
        pose: PlayerPose::Cheer,
    };
    let cheer_left = SpriteId::Player {
        facing: 4,
        pose: PlayerPose::Cheer,
    };
    assert_eq!(sprite_key(&cheer_right), sprite_key(&cheer_left));
    assert_eq!(
        sprite_key(&SpriteId::Player {
            facing: 3,
            pose: PlayerPose::Normal
        }),
        "player.3"
    );
}

#[test]
fn sheet_round_trips_through_json() {
    let sheet = SpriteSheet::default();
    let json = serde_json::to_string(&sheet).unwrap();
    assert_eq!(SpriteSheet::from_json_str(&json).unwrap(), sheet);
}

#[test]
fn incomplete_sheet_is_rejected() {
    let json = r#"{ "sprites": { "hazard": { "text": "o", "tint": "red" } } }"#;
    let err = SpriteSheet::from_json_str(json).unwrap_err();
    assert!(matches!(err, AssetError::MissingSprite(_)));
}

#[test]
fn unknown_tint_is_a_parse_error() {
    let json = r#"{ "sprites": { "hazard": { "text": "o", "tint": "plaid" } } }"#;
    let err = SpriteSheet::from_json_str(json).unwrap_err();
    assert!(matches!(err, AssetError::Parse(_)));
}

#[test]
fn scene_of_losing_tick_reports_game_over() {
    use bomb_buster::compute::{tick, FrameInput};
    use bomb_buster::config::GameConfig;

    let mut s = make_state();
    s.hazards.push(Hazard::new(Vector2i::new(300, 200), 10, 5));
    assert!(!build_scene(&s).game_over);

    let next = tick(&s, &FrameInput::default(), &GameConfig::default());
    let scene = build_scene(&next);
    assert!(scene.game_over);
    assert_eq!(
        scene.commands.last(),
        Some(&DrawCommand::Text {
            text: GAME_OVER_TEXT.to_string(),
            at: Vector2i::new(400, 325),
            style: TextStyle::Banner,
        })
    );
}
