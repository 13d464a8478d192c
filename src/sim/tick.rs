//! Per-frame simulation tick
//!
//! Order every tick: player, coin, then enemies in list order. Spawns and
//! the game-over reset requested during the pass are applied once it is done,
//! so the enemy list never changes while it is being walked.

use glam::Vec2;
use serde::Serialize;

use super::collision::collide;
use super::state::{GameState, SoundEffect};

/// Something the host may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Player grabbed the coin; `score` is the new displayed value
    CoinCollected { score: u64 },
    /// A queued enemy entered the field
    EnemySpawned { pos: Vec2, vel: Vec2 },
    /// An enemy caught the player
    GameOver { enemies_cleared: usize },
    /// Play now (only emitted while unmuted)
    PlaySound(SoundEffect),
}

/// Events produced by a single tick, in the order they happened
#[derive(Debug, Default)]
pub struct TickEvents {
    pub events: Vec<GameEvent>,
}

impl TickEvents {
    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundEffect> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::PlaySound(effect) => Some(*effect),
            _ => None,
        })
    }

    pub fn coin_collected(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::CoinCollected { .. }))
    }

    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) -> TickEvents {
    let mut events = TickEvents::default();
    state.time_ticks += 1;

    update_player(state);
    update_coin(state, &mut events);
    let caught = update_enemies(state, &mut events);

    if caught {
        let enemies_cleared = state.over();
        events.push(GameEvent::GameOver { enemies_cleared });
    } else {
        apply_pending_spawns(state, &mut events);
    }

    events
}

/// Snap to the pointer, score if the coin is under it
fn update_player(state: &mut GameState) {
    state.player.move_with_mouse(&state.mouse);

    let dimension = state.scoring_dimension();
    collide(&state.player, &state.coin, || {
        state.score.up(dimension, &state.viewport);
    });
}

/// On capture: coin sound, respawn, queue one enemy
fn update_coin(state: &mut GameState, events: &mut TickEvents) {
    let mut captured = false;
    collide(&state.coin, &state.player, || captured = true);
    if !captured {
        return;
    }

    if let Some(effect) = state.sound.audible(SoundEffect::Coin) {
        events.push(GameEvent::PlaySound(effect));
    }
    state.respawn_coin();
    state.request_spawn();

    log::debug!(
        "Coin collected at tick {} (score {:.3})",
        state.time_ticks,
        state.score.value()
    );
    events.push(GameEvent::CoinCollected {
        score: state.score.displayed(),
    });
}

/// Move, bounce and re-face every enemy. Returns true if one caught the player.
///
/// The enemy that catches the player still finishes its own update; the ones
/// after it are skipped because the list is about to be cleared.
fn update_enemies(state: &mut GameState, events: &mut TickEvents) -> bool {
    let mut caught = false;

    for enemy in state.enemies.iter_mut() {
        state.last_enemy_dimension = Some(enemy.dimension);

        collide(&*enemy, &state.player, || caught = true);
        if caught {
            if let Some(effect) = state.sound.audible(SoundEffect::Bark) {
                events.push(GameEvent::PlaySound(effect));
            }
        }

        enemy.advance();
        enemy.bounce(&state.viewport);
        enemy.switch_sprite();

        if caught {
            break;
        }
    }

    caught
}

fn apply_pending_spawns(state: &mut GameState, events: &mut TickEvents) {
    for _ in 0..std::mem::take(&mut state.pending_spawns) {
        let enemy = state.spawn_enemy();
        let (pos, vel) = (enemy.pos, enemy.vel);
        log::debug!("Enemy spawned at {} moving {}", pos, vel);
        events.push(GameEvent::EnemySpawned { pos, vel });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Enemy, Sprite};
    use crate::sim::state::{InputEvent, Viewport};

    fn state() -> GameState {
        GameState::new(12345, Viewport::new(800.0, 600.0).unwrap()).unwrap()
    }

    /// Park every enemy far from the player so it cannot interfere
    fn park_enemies(state: &mut GameState) {
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(700.0, 100.0);
            enemy.vel = Vec2::new(1.0, 1.0);
        }
    }

    #[test]
    fn test_player_follows_mouse() {
        let mut state = state();
        park_enemies(&mut state);
        state.coin.pos = Vec2::new(50.0, 550.0);
        state.handle_input(InputEvent::PointerMove { x: 300.0, y: 200.0 });
        tick(&mut state);
        assert_eq!(state.player.pos, Vec2::new(300.0, 200.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_coin_capture_scores_respawns_and_spawns_after_pass() {
        let mut state = state();
        park_enemies(&mut state);
        state.coin.pos = Vec2::new(100.0, 100.0);
        state.handle_input(InputEvent::PointerMove { x: 100.0, y: 100.0 });

        let events = tick(&mut state);

        assert!(events.coin_collected());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.pending_spawns(), 0);
        assert!((state.score.value() - 1000.0 * 2500.0 / 480000.0).abs() < 1e-9);
        assert_eq!(state.score.displayed(), 5);
        // Muted by default: no sound events
        assert_eq!(events.sounds().count(), 0);
        assert!(matches!(
            events.events.last(),
            Some(GameEvent::EnemySpawned { .. })
        ));
        // Respawned inside the margins
        assert!((50.0..=750.0).contains(&state.coin.pos.x));
        assert!((50.0..=550.0).contains(&state.coin.pos.y));
    }

    #[test]
    fn test_spawned_enemy_not_moved_in_spawn_tick() {
        let mut state = state();
        park_enemies(&mut state);
        state.coin.pos = Vec2::new(100.0, 100.0);
        state.handle_input(InputEvent::PointerMove { x: 100.0, y: 100.0 });

        let events = tick(&mut state);
        let spawned = events
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::EnemySpawned { pos, .. } => Some(*pos),
                _ => None,
            })
            .unwrap();
        assert_eq!(state.enemies[1].pos, spawned);
    }

    #[test]
    fn test_coin_sound_when_unmuted() {
        let mut state = state();
        park_enemies(&mut state);
        let outcome = state.handle_input(InputEvent::Toggle);
        assert_eq!(outcome.play, Some(SoundEffect::Bark));

        state.coin.pos = Vec2::new(100.0, 100.0);
        state.handle_input(InputEvent::PointerMove { x: 100.0, y: 100.0 });
        let events = tick(&mut state);
        assert_eq!(events.sounds().collect::<Vec<_>>(), vec![SoundEffect::Coin]);
    }

    #[test]
    fn test_game_over_resets_score_and_enemies() {
        let mut state = state();
        for _ in 0..4 {
            state.spawn_enemy();
        }
        park_enemies(&mut state);
        state.score.up(50.0, &state.viewport);
        state.score.up(50.0, &state.viewport);
        let shown = state.score.displayed();

        // Put the second enemy on top of the player
        state.coin.pos = Vec2::new(50.0, 550.0);
        state.handle_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        state.enemies[1].pos = Vec2::new(410.0, 300.0);

        let events = tick(&mut state);

        assert!(events.game_over());
        assert!(matches!(
            events.events.last(),
            Some(GameEvent::GameOver { enemies_cleared: 5 })
        ));
        assert!(state.enemies.is_empty());
        assert_eq!(state.score.value(), 0.0);
        // Display is only refreshed by the next score
        assert_eq!(state.score.displayed(), shown);
    }

    #[test]
    fn test_game_over_drops_same_tick_spawn() {
        let mut state = state();
        park_enemies(&mut state);
        state.coin.pos = Vec2::new(400.0, 300.0);
        state.handle_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        state.enemies[0].pos = Vec2::new(400.0, 320.0);

        let events = tick(&mut state);

        assert!(events.coin_collected());
        assert!(events.game_over());
        assert!(state.enemies.is_empty());
        assert_eq!(state.pending_spawns(), 0);
        assert!(
            !events
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        );
    }

    #[test]
    fn test_bark_when_caught_unmuted() {
        let mut state = state();
        state.handle_input(InputEvent::Toggle);
        state.coin.pos = Vec2::new(50.0, 550.0);
        state.handle_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        state.enemies[0].pos = Vec2::new(400.0, 300.0);

        let events = tick(&mut state);
        assert_eq!(events.sounds().collect::<Vec<_>>(), vec![SoundEffect::Bark]);
    }

    #[test]
    fn test_loop_continues_after_game_over() {
        let mut state = state();
        state.coin.pos = Vec2::new(50.0, 550.0);
        state.handle_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        state.enemies[0].pos = Vec2::new(400.0, 300.0);
        tick(&mut state);
        assert!(state.enemies.is_empty());

        // Next capture seeds exactly one enemy
        state.coin.pos = Vec2::new(400.0, 300.0);
        let events = tick(&mut state);
        assert!(events.coin_collected());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_score_uses_last_processed_enemy() {
        let mut state = state();
        state.enemies.clear();
        state
            .enemies
            .push(Enemy::new(Vec2::new(700.0, 100.0), 20.0, 1).unwrap());
        state
            .enemies
            .push(Enemy::new(Vec2::new(100.0, 500.0), 80.0, 1).unwrap());
        state.coin.pos = Vec2::new(50.0, 50.0);
        state.handle_input(InputEvent::PointerMove { x: 400.0, y: 300.0 });
        tick(&mut state);

        state.coin.pos = Vec2::new(400.0, 300.0);
        tick(&mut state);
        let expected = 80.0f64 * 80.0 / 480000.0 * 1000.0;
        assert!((state.score.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_enemies_move_and_face() {
        let mut state = state();
        state.coin.pos = Vec2::new(50.0, 550.0);
        state.handle_input(InputEvent::PointerMove { x: 50.0, y: 50.0 });
        state.enemies[0] = Enemy::new(Vec2::new(400.0, 300.0), 50.0, -2).unwrap();
        tick(&mut state);
        assert_eq!(state.enemies[0].pos, Vec2::new(398.0, 298.0));
        assert_eq!(state.enemies[0].sprite, Sprite::EnemyLeft);
    }

    #[test]
    fn test_determinism() {
        let mut a = state();
        let mut b = state();
        let path = [(100.0, 100.0), (300.0, 250.0), (700.0, 500.0), (20.0, 40.0)];
        for _ in 0..50 {
            for (x, y) in path {
                a.handle_input(InputEvent::PointerMove { x, y });
                b.handle_input(InputEvent::PointerMove { x, y });
                tick(&mut a);
                tick(&mut b);
            }
        }
        assert_eq!(a.coin.pos, b.coin.pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.score.value(), b.score.value());
    }

    #[test]
    fn test_events_encode_as_json() {
        let spawned = GameEvent::EnemySpawned {
            pos: Vec2::new(100.0, 200.0),
            vel: Vec2::splat(-3.0),
        };
        assert_eq!(
            serde_json::to_value(&spawned).unwrap(),
            serde_json::json!({ "EnemySpawned": { "pos": [100.0, 200.0], "vel": [-3.0, -3.0] } })
        );
        assert_eq!(
            serde_json::to_value(GameEvent::CoinCollected { score: 5 }).unwrap(),
            serde_json::json!({ "CoinCollected": { "score": 5 } })
        );
        assert_eq!(
            serde_json::to_value(GameEvent::PlaySound(SoundEffect::Bark)).unwrap(),
            serde_json::json!({ "PlaySound": "Bark" })
        );
    }
}
