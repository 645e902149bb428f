use std::path::Path;

use crate::error::AudioError;

/// Loads and plays sounds for the asset manager.
///
/// A backend lives on the native worker thread for its whole life, so neither it
/// nor its sounds need to be `Send`.
pub trait SoundBackend {
    /// A loaded, ready-to-play sound
    type Sound;

    fn load(&mut self, path: &Path) -> Result<Self::Sound, AudioError>;

    /// Start `sound` from the beginning at `volume` (0.0-1.0), restarting it if
    /// it is already playing.
    fn play(&mut self, sound: &mut Self::Sound, volume: f32) -> Result<(), AudioError>;

    /// Stop and free a sound
    fn release(&mut self, sound: Self::Sound);
}
