//! Sound effect playback
//!
//! On the web each effect is an `HtmlAudioElement` with a fixed volume.
//! Natively there is no audio device; playback is logged instead. Muting is
//! decided by the simulation, so anything that reaches `play` is audible.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsValue, closure::Closure};
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

use crate::sim::{Sound, SoundEffect};

impl SoundEffect {
    /// Asset path of the sample
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Coin => "./public/audio/coin.wav",
            SoundEffect::Bark => "./public/audio/bark.wav",
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    coin_volume: f32,
    bark_volume: f32,
    #[cfg(target_arch = "wasm32")]
    coin: Option<HtmlAudioElement>,
    #[cfg(target_arch = "wasm32")]
    bark: Option<HtmlAudioElement>,
    /// Rejection handler shared by every `play()` promise (autoplay blocks land here)
    #[cfg(target_arch = "wasm32")]
    on_rejected: Closure<dyn FnMut(JsValue)>,
    /// Effects played so far (native only keeps this)
    #[cfg(not(target_arch = "wasm32"))]
    played: Vec<SoundEffect>,
}

impl AudioManager {
    /// Volumes are fixed here and never ramp
    pub fn new(sound: &Sound) -> Self {
        let coin_volume = sound.volume(SoundEffect::Coin);
        let bark_volume = sound.volume(SoundEffect::Bark);

        Self {
            coin_volume,
            bark_volume,
            #[cfg(target_arch = "wasm32")]
            coin: load_sample(SoundEffect::Coin, coin_volume),
            #[cfg(target_arch = "wasm32")]
            bark: load_sample(SoundEffect::Bark, bark_volume),
            #[cfg(target_arch = "wasm32")]
            on_rejected: Closure::new(|e: JsValue| {
                log::warn!("Playback rejected: {:?}", e);
            }),
            #[cfg(not(target_arch = "wasm32"))]
            played: Vec::new(),
        }
    }

    pub fn volume(&self, effect: SoundEffect) -> f32 {
        match effect {
            SoundEffect::Coin => self.coin_volume,
            SoundEffect::Bark => self.bark_volume,
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&mut self, effect: SoundEffect) {
        let sample = match effect {
            SoundEffect::Coin => &self.coin,
            SoundEffect::Bark => &self.bark,
        };
        let Some(sample) = sample else { return };

        // Restart if still playing from the last capture
        sample.set_current_time(0.0);
        match sample.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_rejected);
            }
            Err(e) => log::warn!("Failed to play {:?}: {:?}", effect, e),
        }
    }

    /// Play a sound effect
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&mut self, effect: SoundEffect) {
        log::debug!("play {:?} at volume {:.2}", effect, self.volume(effect));
        self.played.push(effect);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }
}

#[cfg(target_arch = "wasm32")]
fn load_sample(effect: SoundEffect, volume: f32) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(effect.asset_path()) {
        Ok(el) => {
            el.set_volume(volume as f64);
            Some(el)
        }
        Err(e) => {
            log::warn!("Failed to load {} - {:?} disabled: {:?}", effect.asset_path(), effect, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_from_sound() {
        let audio = AudioManager::new(&Sound::default());
        assert_eq!(audio.volume(SoundEffect::Coin), 0.07);
        assert_eq!(audio.volume(SoundEffect::Bark), 1.0);
    }

    #[test]
    fn test_native_play_records() {
        let mut audio = AudioManager::new(&Sound::default());
        audio.play(SoundEffect::Bark);
        audio.play(SoundEffect::Coin);
        assert_eq!(audio.played(), &[SoundEffect::Bark, SoundEffect::Coin]);
    }

    #[test]
    fn test_asset_paths() {
        assert!(SoundEffect::Coin.asset_path().ends_with("coin.wav"));
        assert!(SoundEffect::Bark.asset_path().ends_with("bark.wav"));
    }
}
