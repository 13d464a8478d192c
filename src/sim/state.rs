//! Game state and the small records it aggregates
//!
//! One `GameState` lives for the whole page session. It is passed by
//! `&mut` into every tick and every input handler.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, Enemy, Player, random_spawn_point, validate_dimension};
use crate::consts::*;
use crate::error::{OctovoltError, Result};
use crate::settings::Settings;

/// Live canvas size; resizes are applied between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(OctovoltError::InvalidViewport { width, height })
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

/// Last known pointer/touch position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mouse {
    pub pos: Vec2,
}

impl Mouse {
    /// Starting pointer position.
    ///
    /// Both axes use half the width, so on a landscape screen the player
    /// starts below the vertical center.
    pub fn initial(viewport: &Viewport) -> Self {
        let half = viewport.width() / 2.0;
        Self {
            pos: Vec2::new(half, half),
        }
    }
}

/// Running score plus the integer shown in the HUD
#[derive(Debug, Clone, Default)]
pub struct Score {
    value: f64,
    displayed: u64,
}

impl Score {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// What the HUD shows; only refreshed by `up`
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    /// Add the share of the screen an enemy covers, scaled by `SCORE_SCALE`
    pub fn up(&mut self, enemy_dimension: f32, viewport: &Viewport) {
        let enemy_area = (enemy_dimension as f64).powi(2);
        let enemy_percentage = enemy_area / viewport.area();
        self.value += enemy_percentage * SCORE_SCALE;
        self.displayed = self.value.trunc() as u64;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// The two sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Coin captured
    Coin,
    /// Caught by an enemy, or sound switched on
    Bark,
}

/// Sound toggle icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundIcon {
    On,
    Off,
}

impl SoundIcon {
    pub fn image_path(&self) -> &'static str {
        match self {
            SoundIcon::On => "./public/images/soundon.png",
            SoundIcon::Off => "./public/images/soundoff.png",
        }
    }
}

/// Mute state shared by the coin and bark handles
#[derive(Debug, Clone)]
pub struct Sound {
    muted: bool,
    pub coin_volume: f32,
    pub bark_volume: f32,
    pub icon: SoundIcon,
}

impl Default for Sound {
    fn default() -> Self {
        Self {
            muted: false,
            coin_volume: COIN_VOLUME,
            bark_volume: BARK_VOLUME,
            icon: SoundIcon::On,
        }
    }
}

impl Sound {
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn volume(&self, effect: SoundEffect) -> f32 {
        match effect {
            SoundEffect::Coin => self.coin_volume,
            SoundEffect::Bark => self.bark_volume,
        }
    }

    /// `Some(effect)` unless muted
    pub fn audible(&self, effect: SoundEffect) -> Option<SoundEffect> {
        (!self.muted).then_some(effect)
    }
}

/// Host input, applied as it arrives; the last one before a tick wins
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse move or touch move
    PointerMove { x: f32, y: f32 },
    /// Click, touch start or Enter
    Toggle,
    /// Window resized
    Resize { width: f32, height: f32 },
}

/// What the host should change on the page after an input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiUpdate {
    /// Remove the start overlay
    pub dismiss_overlay: bool,
    /// Swap the sound icon
    pub icon: Option<SoundIcon>,
    /// Play right away
    pub play: Option<SoundEffect>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub coin: Coin,
    /// Enemies in update order
    pub enemies: Vec<Enemy>,
    pub score: Score,
    pub sound: Sound,
    pub mouse: Mouse,
    pub viewport: Viewport,
    /// Start overlay still on screen
    pub overlay_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Diameter given to spawned enemies
    enemy_dimension: f32,
    /// Distance kept from every edge when placing the coin or an enemy
    spawn_margin: i32,
    /// Dimension of the enemy processed most recently; scores coin captures
    pub(crate) last_enemy_dimension: Option<f32>,
    /// Spawns requested during the current tick
    pub(crate) pending_spawns: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session with default sizes: muted, one enemy, coin placed at random
    pub fn new(seed: u64, viewport: Viewport) -> Result<Self> {
        Self::from_settings(&Settings::default(), seed, viewport)
    }

    pub fn from_settings(settings: &Settings, seed: u64, viewport: Viewport) -> Result<Self> {
        let dimension = validate_dimension(settings.entity_dimension)?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mouse = Mouse::initial(&viewport);
        let player = Player::new(mouse.pos, dimension)?;
        let coin = Coin::new(
            random_spawn_point(&viewport, settings.spawn_margin, &mut rng),
            dimension,
        )?;

        let mut sound = Sound {
            coin_volume: settings.coin_volume,
            bark_volume: settings.bark_volume,
            ..Sound::default()
        };
        if settings.start_muted {
            sound.mute();
            sound.icon = SoundIcon::Off;
        }

        let mut state = Self {
            seed,
            player,
            coin,
            enemies: Vec::new(),
            score: Score::default(),
            sound,
            mouse,
            viewport,
            overlay_visible: true,
            time_ticks: 0,
            enemy_dimension: dimension,
            spawn_margin: settings.spawn_margin,
            last_enemy_dimension: None,
            pending_spawns: 0,
            rng,
        };

        state.spawn_enemy();

        Ok(state)
    }

    /// Append one enemy at a random position
    pub fn spawn_enemy(&mut self) -> &Enemy {
        // enemy_dimension was validated at construction
        let enemy = Enemy::spawn_validated(
            &self.viewport,
            self.spawn_margin,
            &mut self.rng,
            self.enemy_dimension,
        );
        self.enemies.push(enemy);
        &self.enemies[self.enemies.len() - 1]
    }

    /// Queue a spawn for the end of the current tick
    pub fn request_spawn(&mut self) {
        self.pending_spawns += 1;
    }

    pub fn pending_spawns(&self) -> u32 {
        self.pending_spawns
    }

    pub fn enemy_dimension(&self) -> f32 {
        self.enemy_dimension
    }

    pub fn spawn_margin(&self) -> i32 {
        self.spawn_margin
    }

    /// Coin capture scoring uses this enemy size
    pub fn scoring_dimension(&self) -> f32 {
        self.last_enemy_dimension.unwrap_or(self.enemy_dimension)
    }

    /// Move the coin somewhere new
    pub fn respawn_coin(&mut self) {
        self.coin.respawn(&self.viewport, self.spawn_margin, &mut self.rng);
    }

    /// Caught by an enemy: coin moves, score resets, every enemy goes away.
    /// Player and coin identities survive.
    ///
    /// Returns how many enemies were removed.
    pub fn over(&mut self) -> usize {
        let cleared = self.enemies.len();
        self.respawn_coin();
        self.score.reset();
        self.enemies.clear();
        self.pending_spawns = 0;
        log::info!("Game over: {} enemies cleared", cleared);
        cleared
    }

    /// Apply one host input
    pub fn handle_input(&mut self, event: InputEvent) -> UiUpdate {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.mouse.pos = Vec2::new(x, y);
                UiUpdate::default()
            }
            InputEvent::Toggle => {
                let dismiss_overlay = std::mem::replace(&mut self.overlay_visible, false);
                if self.sound.is_muted() {
                    self.sound.unmute();
                    self.sound.icon = SoundIcon::On;
                    UiUpdate {
                        dismiss_overlay,
                        icon: Some(SoundIcon::On),
                        play: Some(SoundEffect::Bark),
                    }
                } else {
                    self.sound.mute();
                    self.sound.icon = SoundIcon::Off;
                    UiUpdate {
                        dismiss_overlay,
                        icon: Some(SoundIcon::Off),
                        play: None,
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                match Viewport::new(width, height) {
                    Ok(viewport) => self.viewport = viewport,
                    Err(e) => log::warn!("Ignoring resize: {}", e),
                }
                UiUpdate::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(12345, Viewport::new(800.0, 600.0).unwrap()).unwrap()
    }

    #[test]
    fn test_viewport_rejects_empty() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.enemies.len(), 1);
        assert!(state.sound.is_muted());
        assert_eq!(state.sound.icon, SoundIcon::Off);
        assert!(state.overlay_visible);
        assert_eq!(state.player.pos, Vec2::new(400.0, 400.0));
        assert_eq!(state.score.value(), 0.0);
        assert!((50.0..=750.0).contains(&state.coin.pos.x));
        assert!((50.0..=550.0).contains(&state.coin.pos.y));
    }

    #[test]
    fn test_settings_dimension_validated() {
        let settings = Settings {
            entity_dimension: 0.0,
            ..Settings::default()
        };
        let vp = Viewport::new(800.0, 600.0).unwrap();
        assert!(matches!(
            GameState::from_settings(&settings, 1, vp),
            Err(OctovoltError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_score_up_800x600() {
        let mut score = Score::default();
        score.up(50.0, &Viewport::new(800.0, 600.0).unwrap());
        assert!((score.value() - 1000.0 * 2500.0 / 480000.0).abs() < 1e-9);
        assert!((score.value() - 5.208).abs() < 0.001);
        assert_eq!(score.displayed(), 5);
    }

    #[test]
    fn test_score_reset_keeps_display() {
        let vp = Viewport::new(100.0, 100.0).unwrap();
        let mut score = Score::default();
        score.up(50.0, &vp); // +250
        score.up(50.0, &vp);
        assert_eq!(score.displayed(), 500);
        score.reset();
        assert_eq!(score.value(), 0.0);
        assert_eq!(score.displayed(), 500);
        score.up(10.0, &vp); // +10
        assert_eq!(score.displayed(), 10);
    }

    #[test]
    fn test_toggle_unmutes_then_mutes() {
        let mut state = state();
        let first = state.handle_input(InputEvent::Toggle);
        assert_eq!(
            first,
            UiUpdate {
                dismiss_overlay: true,
                icon: Some(SoundIcon::On),
                play: Some(SoundEffect::Bark),
            }
        );
        assert!(!state.sound.is_muted());
        assert!(!state.overlay_visible);

        let second = state.handle_input(InputEvent::Toggle);
        assert!(!second.dismiss_overlay);
        assert_eq!(second.icon, Some(SoundIcon::Off));
        assert_eq!(second.play, None);
        assert!(state.sound.is_muted());
    }

    #[test]
    fn test_pointer_and_resize() {
        let mut state = state();
        state.handle_input(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        assert_eq!(state.mouse.pos, Vec2::new(10.0, 20.0));

        state.handle_input(InputEvent::Resize {
            width: 1024.0,
            height: 768.0,
        });
        assert_eq!(state.viewport.width(), 1024.0);

        // Zero-area resize is ignored
        state.handle_input(InputEvent::Resize {
            width: 0.0,
            height: 768.0,
        });
        assert_eq!(state.viewport.width(), 1024.0);
    }

    #[test]
    fn test_over_clears_everything() {
        let mut state = state();
        for _ in 0..6 {
            state.spawn_enemy();
        }
        state.request_spawn();
        state.score.up(50.0, &state.viewport);
        assert_eq!(state.over(), 7);
        assert!(state.enemies.is_empty());
        assert_eq!(state.pending_spawns(), 0);
        assert_eq!(state.score.value(), 0.0);
    }

    #[test]
    fn test_sound_audible() {
        let mut sound = Sound::default();
        assert_eq!(sound.audible(SoundEffect::Coin), Some(SoundEffect::Coin));
        sound.mute();
        assert_eq!(sound.audible(SoundEffect::Bark), None);
        assert!(sound.volume(SoundEffect::Coin) < sound.volume(SoundEffect::Bark));
    }

    #[test]
    fn test_spawn_margin_setting_bounds_placement() {
        let settings = Settings::from_json(r#"{"spawn_margin": 250}"#).unwrap();
        let vp = Viewport::new(800.0, 600.0).unwrap();
        for seed in 0..200 {
            let mut state = GameState::from_settings(&settings, seed, vp).unwrap();
            assert_eq!(state.spawn_margin(), 250);
            state.respawn_coin();
            assert!((250.0..=550.0).contains(&state.coin.pos.x));
            assert!((250.0..=350.0).contains(&state.coin.pos.y));
            let enemy = state.spawn_enemy();
            assert!((250.0..=550.0).contains(&enemy.pos.x));
            assert!((250.0..=350.0).contains(&enemy.pos.y));
        }
    }

    proptest::proptest! {
        #[test]
        fn prop_score_up_exact(d in 1f32..500.0, w in 1f32..4000.0, h in 1f32..4000.0) {
            let vp = Viewport::new(w, h).unwrap();
            let mut score = Score::default();
            score.up(d, &vp);
            let expected = SCORE_SCALE * (d as f64).powi(2) / (w as f64 * h as f64);
            proptest::prop_assert!((score.value() - expected).abs() <= expected * 1e-12);
            proptest::prop_assert_eq!(score.displayed(), score.value().trunc() as u64);
        }

        #[test]
        fn prop_over_clears(seed in 0u64..10_000, n_enemies in 0usize..40, n_ups in 0usize..40) {
            let mut state = GameState::new(seed, Viewport::new(800.0, 600.0).unwrap()).unwrap();
            for _ in 0..n_enemies {
                state.spawn_enemy();
            }
            for _ in 0..n_ups {
                state.score.up(50.0, &state.viewport);
            }
            proptest::prop_assert_eq!(state.over(), n_enemies + 1);
            proptest::prop_assert_eq!(state.enemies.len(), 0);
            proptest::prop_assert_eq!(state.score.value(), 0.0);
        }
    }
}
