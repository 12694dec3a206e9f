use std::io::Write;

use space_shooter::config::GameConfig;
use space_shooter::error::ConfigError;
use space_shooter::entities::*;
use space_shooter::model::{GameEvent, GameModel};
use space_shooter::stats::PlayerStatsTracker;

/// Default constants with spawning switched off, so tests control every object.
fn quiet_config() -> GameConfig {
    GameConfig {
        start_spawn_rate: 0,
        spawn_rate_increase: 0,
        ..GameConfig::default()
    }
}

fn make_model() -> GameModel {
    let mut model = GameModel::new(quiet_config(), PlayerStatsTracker::new());
    model.set_random_seed(42);
    model
}

fn count(model: &GameModel, kind: ObjectKind) -> usize {
    model.space_objects().iter().filter(|o| o.kind() == kind).count()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_model_starting_state() {
    let model = GameModel::new(GameConfig::default(), PlayerStatsTracker::new());
    assert_eq!(model.ship().position(), Position::new(5, 10));
    assert_eq!(model.ship().health(), 100);
    assert_eq!(model.ship().score(), 0);
    assert_eq!(model.level(), 1);
    assert_eq!(model.spawn_rate(), 2);
    assert!(model.space_objects().is_empty());
    assert!(!model.check_game_over());
}

#[test]
fn config_json_overrides_only_given_fields() {
    let config = GameConfig::from_json(r#"{ "width": 12, "enemy_damage": 35 }"#).unwrap();
    assert_eq!(config.width, 12);
    assert_eq!(config.enemy_damage, 35);
    assert_eq!(config.height, 20);
    assert_eq!(config.asteroid_damage, 10);
}

fn rejection(json: &str) -> String {
    match GameConfig::from_json(json) {
        Err(ConfigError::Invalid(reason)) => reason,
        other => panic!("expected an invalid config for {json}, got {other:?}"),
    }
}

#[test]
fn default_config_is_valid() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn empty_arena_is_rejected() {
    assert!(rejection(r#"{ "width": 0 }"#).contains("arena"));
    assert!(rejection(r#"{ "height": -3 }"#).contains("arena"));
}

#[test]
fn ship_start_outside_arena_is_rejected() {
    assert!(rejection(r#"{ "ship_start_x": 50 }"#).contains("ship start"));
    assert!(rejection(r#"{ "width": 5 }"#).contains("ship start"));
    assert!(GameConfig::from_json(r#"{ "width": 6 }"#).is_ok());
}

#[test]
fn negative_damage_and_restore_are_rejected() {
    assert!(rejection(r#"{ "asteroid_damage": -40 }"#).contains("asteroid_damage"));
    assert!(rejection(r#"{ "enemy_damage": -1 }"#).contains("enemy_damage"));
    assert!(rejection(r#"{ "health_restore": -5 }"#).contains("health_restore"));
    assert!(GameConfig::from_json(r#"{ "asteroid_damage": 0 }"#).is_ok());
}

#[test]
fn non_positive_max_health_is_rejected() {
    assert!(rejection(r#"{ "ship_max_health": 0 }"#).contains("ship_max_health"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        GameConfig::from_json("{ width: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_validates_file_contents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "width": 0 }}"#).unwrap();
    let err = GameConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("arena"));
}

#[test]
fn zero_width_model_does_not_spawn() {
    let config = GameConfig {
        width: 0,
        start_spawn_rate: 100,
        ..GameConfig::default()
    };
    let mut model = GameModel::new(config, PlayerStatsTracker::new());
    model.spawn_objects();
    assert!(model.space_objects().is_empty());
}

// ── update_game ───────────────────────────────────────────────────────────────

#[test]
fn update_moves_bullets_up_and_fallers_down() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(2, 5)));
    model.add_object(Asteroid::new(Position::new(3, 5), 1));
    model.update_game(1);
    let positions: Vec<Position> = model.space_objects().iter().map(|o| o.position()).collect();
    assert_eq!(positions, vec![Position::new(2, 4), Position::new(3, 6)]);
}

#[test]
fn update_removes_objects_that_leave_the_arena() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(2, 0))); // → y = -1
    model.add_object(Enemy::new(Position::new(4, 19), 1)); // → y = 20
    model.add_object(PowerUp::new(Position::new(6, 18), 1, PowerUpKind::Health { amount: 20 }));
    model.update_game(1);
    assert_eq!(model.space_objects().len(), 1);
    assert_eq!(model.space_objects()[0].position(), Position::new(6, 19));
}

// ── fire_bullet ───────────────────────────────────────────────────────────────

#[test]
fn fire_adds_bullet_at_ship_position_every_time() {
    let mut model = make_model();
    for _ in 0..5 {
        model.fire_bullet();
    }
    assert_eq!(count(&model, ObjectKind::Bullet), 5);
    assert!(model
        .space_objects()
        .iter()
        .all(|o| o.position() == model.ship().position()));
    assert_eq!(model.take_events(), vec![GameEvent::BulletFired; 5]);
    assert!(model.take_events().is_empty());
}

// ── check_collisions: ship ────────────────────────────────────────────────────

#[test]
fn asteroid_on_ship_deals_damage_and_is_removed() {
    let mut model = make_model();
    model.add_object(Asteroid::new(model.ship().position(), 1));
    model.check_collisions();
    assert_eq!(model.ship().health(), 90);
    assert!(model.space_objects().is_empty());
    assert_eq!(model.take_events(), vec![GameEvent::HitByAsteroid { damage: 10 }]);
}

#[test]
fn enemy_on_ship_deals_damage_and_is_removed() {
    let mut model = make_model();
    model.add_object(Enemy::new(model.ship().position(), 1));
    model.check_collisions();
    assert_eq!(model.ship().health(), 80);
    assert!(model.space_objects().is_empty());
}

#[test]
fn power_ups_on_ship_apply_and_are_removed() {
    let mut model = make_model();
    let at = model.ship().position();
    model.ship_mut().take_damage(30);
    model.add_object(PowerUp::new(at, 1, PowerUpKind::Shield { points: 50 }));
    model.add_object(PowerUp::new(at, 1, PowerUpKind::Health { amount: 20 }));
    model.check_collisions();
    assert_eq!(model.ship().score(), 50);
    assert_eq!(model.ship().health(), 90);
    assert!(model.space_objects().is_empty());
}

#[test]
fn bullet_on_ship_cell_is_not_a_ship_collision() {
    let mut model = make_model();
    model.fire_bullet();
    model.check_collisions();
    assert_eq!(model.ship().health(), 100);
    assert_eq!(count(&model, ObjectKind::Bullet), 1);
}

#[test]
fn objects_elsewhere_do_not_touch_ship() {
    let mut model = make_model();
    model.add_object(Enemy::new(Position::new(0, 0), 1));
    model.check_collisions();
    assert_eq!(model.ship().health(), 100);
    assert_eq!(model.space_objects().len(), 1);
}

// ── check_collisions: bullets ─────────────────────────────────────────────────

#[test]
fn bullet_destroying_asteroid_does_not_count_as_hit() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(1, 1)));
    model.add_object(Asteroid::new(Position::new(1, 1), 1));
    model.check_collisions();
    assert!(model.space_objects().is_empty());
    assert_eq!(model.stats().shots_hit(), 0);
}

#[test]
fn bullet_destroying_enemy_counts_as_hit() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(1, 1)));
    model.add_object(Enemy::new(Position::new(1, 1), 1));
    model.check_collisions();
    assert!(model.space_objects().is_empty());
    assert_eq!(model.stats().shots_hit(), 1);
}

#[test]
fn bullet_ignores_power_ups() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(1, 1)));
    model.add_object(PowerUp::new(Position::new(1, 1), 1, PowerUpKind::Shield { points: 50 }));
    model.check_collisions();
    assert_eq!(model.space_objects().len(), 2);
}

#[test]
fn two_bullets_cannot_share_one_enemy() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(1, 1)));
    model.add_object(Bullet::new(Position::new(1, 1)));
    model.add_object(Enemy::new(Position::new(1, 1), 1));
    model.check_collisions();
    assert_eq!(model.stats().shots_hit(), 1);
    assert_eq!(count(&model, ObjectKind::Bullet), 1);
    assert_eq!(count(&model, ObjectKind::Enemy), 0);
}

#[test]
fn enemy_removed_by_ship_is_not_also_shot() {
    let mut model = make_model();
    let at = model.ship().position();
    model.add_object(Enemy::new(at, 1));
    model.fire_bullet();
    model.check_collisions();
    assert_eq!(model.ship().health(), 80);
    assert_eq!(model.stats().shots_hit(), 0);
    assert_eq!(count(&model, ObjectKind::Bullet), 1);
}

#[test]
fn bullet_meets_falling_enemy_after_update() {
    let mut model = make_model();
    model.add_object(Bullet::new(Position::new(5, 10)));
    model.add_object(Enemy::new(Position::new(5, 8), 1));
    model.update_game(1);
    model.check_collisions();
    assert!(model.space_objects().is_empty());
    assert_eq!(model.stats().shots_hit(), 1);
}

// ── spawn_objects ─────────────────────────────────────────────────────────────

#[test]
fn zero_spawn_rate_never_spawns() {
    let mut model = make_model();
    for _ in 0..200 {
        model.spawn_objects();
    }
    assert!(model.space_objects().is_empty());
}

#[test]
fn spawns_land_on_top_row_in_distinct_cells() {
    let config = GameConfig {
        start_spawn_rate: 100,
        enemy_spawn_factor: 1.0,
        power_up_spawn_factor: 1.0,
        ..GameConfig::default()
    };
    let mut model = GameModel::new(config, PlayerStatsTracker::new());
    model.set_random_seed(7);
    model.spawn_objects();

    let objects = model.space_objects();
    assert!(!objects.is_empty() && objects.len() <= 3);
    assert_eq!(objects[0].kind(), ObjectKind::Asteroid);
    for (i, a) in objects.iter().enumerate() {
        assert_eq!(a.position().y, 0);
        for b in &objects[i + 1..] {
            assert_ne!(a.position(), b.position());
        }
    }
}

#[test]
fn earlier_category_claims_contested_cell() {
    // One column: every category rolls x = 0, so only the asteroid fits.
    let config = GameConfig {
        width: 1,
        ship_start_x: 0,
        start_spawn_rate: 100,
        enemy_spawn_factor: 1.0,
        power_up_spawn_factor: 1.0,
        ..GameConfig::default()
    };
    let mut model = GameModel::new(config, PlayerStatsTracker::new());
    model.set_random_seed(1);
    model.spawn_objects();
    assert_eq!(model.space_objects().len(), 1);
    assert_eq!(model.space_objects()[0].kind(), ObjectKind::Asteroid);
}

#[test]
fn spawn_skips_cell_held_by_ship() {
    let config = GameConfig {
        width: 1,
        ship_start_x: 0,
        ship_start_y: 0,
        start_spawn_rate: 100,
        ..GameConfig::default()
    };
    let mut model = GameModel::new(config, PlayerStatsTracker::new());
    model.spawn_objects();
    assert!(model.space_objects().is_empty());
}

#[test]
fn same_seed_gives_same_spawns() {
    let config = GameConfig {
        start_spawn_rate: 40,
        ..GameConfig::default()
    };
    let run = |seed: u64| {
        let mut model = GameModel::new(config.clone(), PlayerStatsTracker::new());
        model.set_random_seed(seed);
        for tick in 1..=50 {
            model.update_game(tick);
            model.spawn_objects();
        }
        model.space_objects().to_vec()
    };
    assert_eq!(run(99), run(99));
    assert!(!run(99).is_empty());
}

// ── level_up ──────────────────────────────────────────────────────────────────

#[test]
fn level_up_at_exact_threshold() {
    let mut model = GameModel::new(GameConfig::default(), PlayerStatsTracker::new());
    model.ship_mut().add_points(100);
    model.level_up();
    assert_eq!(model.level(), 2);
    assert_eq!(model.spawn_rate(), 7);
    assert_eq!(
        model.take_events(),
        vec![GameEvent::LevelUp { level: 2, spawn_rate: 7 }]
    );
}

#[test]
fn no_level_up_one_below_threshold() {
    let mut model = GameModel::new(GameConfig::default(), PlayerStatsTracker::new());
    model.ship_mut().add_points(99);
    model.level_up();
    assert_eq!(model.level(), 1);
    assert_eq!(model.spawn_rate(), 2);
}

#[test]
fn one_level_per_call_even_when_far_past_threshold() {
    let mut model = GameModel::new(GameConfig::default(), PlayerStatsTracker::new());
    model.ship_mut().add_points(1000);
    model.level_up();
    assert_eq!(model.level(), 2);
    model.level_up();
    assert_eq!(model.level(), 3);
    assert_eq!(model.spawn_rate(), 12);
}

#[test]
fn threshold_scales_with_level() {
    let mut model = GameModel::new(GameConfig::default(), PlayerStatsTracker::new());
    model.ship_mut().add_points(150);
    model.level_up(); // 150 >= 100
    model.level_up(); // 150 < 200
    assert_eq!(model.level(), 2);
}

// ── check_game_over ───────────────────────────────────────────────────────────

#[test]
fn game_over_when_health_reaches_zero() {
    let mut model = make_model();
    for _ in 0..5 {
        model.add_object(Enemy::new(model.ship().position(), 1));
        model.check_collisions();
    }
    assert_eq!(model.ship().health(), 0);
    assert!(model.check_game_over());
}

#[test]
fn event_messages_match_log_format() {
    assert_eq!(GameEvent::BulletFired.to_string(), "Bullet fired!");
    assert_eq!(
        GameEvent::LevelUp { level: 3, spawn_rate: 12 }.to_string(),
        "Level Up! Welcome to Level 3. Spawn rate increased to 12%."
    );
    assert_eq!(
        GameEvent::HitByEnemy { damage: 20 }.to_string(),
        "Hit by enemy! Health reduced by 20."
    );
}
