/// Asset manager
///
/// Keeps the loaded sounds of the native plugin, keyed by asset reference, and
/// turns each [`SoundCommand`] into the plugin result sent back over the bridge.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::backend::SoundBackend;
use crate::bridge::PluginResult;
use crate::config::resolve_asset_path;
use crate::messaging::{EventBus, SoundCommand, SoundEvent};

const LOG_PREFIX: &str = "UISounds";

pub struct AssetManager<B: SoundBackend> {
    backend: B,
    asset_root: PathBuf,
    loaded: HashMap<String, B::Sound>,
    events: EventBus,
}

impl<B: SoundBackend> AssetManager<B> {
    pub fn new(backend: B, asset_root: impl Into<PathBuf>, events: EventBus) -> Self {
        Self {
            backend,
            asset_root: asset_root.into(),
            loaded: HashMap::new(),
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn is_loaded(&self, asset_path: &str) -> bool {
        self.loaded.contains_key(asset_path)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn execute(&mut self, command: &SoundCommand) -> PluginResult {
        match command {
            SoundCommand::Preload { asset_path } => self.preload(asset_path.as_deref()),
            SoundCommand::PreloadMultiple { asset_paths } => self.preload_multiple(asset_paths),
            SoundCommand::Play { asset_path, volume } => self.play(asset_path.as_deref(), *volume),
            SoundCommand::Unload { asset_path } => self.unload(asset_path.as_deref()),
        }
    }

    pub fn preload(&mut self, asset_path: Option<&str>) -> PluginResult {
        let Some(asset_path) = asset_path else {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: Expected assetPath (string) as first argument to preloadSound()"
            ));
        };

        if self.is_loaded(asset_path) {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: '{asset_path}' is already loaded"
            ));
        }

        if let Err(loading_error) = self.load_asset(asset_path) {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: Error while attempting to load '{asset_path}' - {loading_error}"
            ));
        }

        PluginResult::ok_message(format!("{LOG_PREFIX}: '{asset_path}' loaded"))
    }

    /// Load every asset not loaded yet. All entries are attempted; failures are
    /// reported together.
    pub fn preload_multiple(&mut self, asset_paths: &[Option<String>]) -> PluginResult {
        let mut failures: Vec<String> = Vec::new();

        for asset_path in asset_paths {
            let Some(asset_path) = asset_path else {
                failures.push("invalid string".to_string());
                continue;
            };

            if self.is_loaded(asset_path) {
                continue;
            }

            if self.load_asset(asset_path).is_err() {
                failures.push(asset_path.clone());
            }
        }

        if failures.is_empty() {
            return PluginResult::ok_message(format!("{LOG_PREFIX}: All assets loaded"));
        }

        let listed = failures
            .iter()
            .map(|path| format!("'{path}'"))
            .collect::<Vec<_>>()
            .join(", ");
        PluginResult::error_message(format!("{LOG_PREFIX}: Failed to load assets - {listed}"))
    }

    /// Play an asset, loading it first if needed.
    pub fn play(&mut self, asset_path: Option<&str>, volume: f64) -> PluginResult {
        let Some(asset_path) = asset_path else {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: Expected assetPath (String) as first argument to playSound()"
            ));
        };

        if !(0.0..=1.0).contains(&volume) {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: Volume must be >= 0.0 and <= 1.0"
            ));
        }

        let had_to_load_asset = !self.is_loaded(asset_path);
        if had_to_load_asset {
            let result = self.preload(Some(asset_path));
            if !result.is_ok() {
                return result;
            }
        }

        let Some(sound) = self.loaded.get_mut(asset_path) else {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: no sound loaded for '{asset_path}'!"
            ));
        };

        let volume = volume as f32;
        if let Err(e) = self.backend.play(sound, volume) {
            tracing::warn!("Playback of {} failed: {}", asset_path, e.describe());
            return PluginResult::error_message(format!("{LOG_PREFIX}: Error - {}", e.describe()));
        }

        tracing::debug!("Playing {} at volume {}", asset_path, volume);
        self.events.publish(SoundEvent::PlaybackStarted {
            asset_path: asset_path.to_string(),
            volume,
        });

        if had_to_load_asset {
            PluginResult::ok_message(format!(
                "{LOG_PREFIX}: '{asset_path}' loaded and playback started. \
                 Call preloadSound() first for lower-latency playback."
            ))
        } else {
            PluginResult::ok_message(format!("{LOG_PREFIX}: '{asset_path}' playback started"))
        }
    }

    pub fn unload(&mut self, asset_path: Option<&str>) -> PluginResult {
        let Some(asset_path) = asset_path else {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: Expected assetPath (String) as first argument to unloadSound()"
            ));
        };

        let Some(sound) = self.loaded.remove(asset_path) else {
            return PluginResult::error_message(format!(
                "{LOG_PREFIX}: '{asset_path}' is not loaded, cannot be unloaded"
            ));
        };

        self.backend.release(sound);
        tracing::info!("Unloaded {}", asset_path);
        self.events.publish(SoundEvent::AssetUnloaded {
            asset_path: asset_path.to_string(),
        });

        PluginResult::ok_message(format!("{LOG_PREFIX}: '{asset_path}' unloaded"))
    }

    /// Release every loaded sound
    pub fn unload_all(&mut self) {
        for (asset_path, sound) in self.loaded.drain() {
            self.backend.release(sound);
            tracing::debug!("Released {}", asset_path);
        }
    }

    fn load_asset(&mut self, asset_path: &str) -> Result<(), String> {
        let full_path = resolve_asset_path(&self.asset_root, asset_path);
        match self.backend.load(&full_path) {
            Ok(sound) => {
                self.loaded.insert(asset_path.to_string(), sound);
                tracing::info!("Loaded {}", asset_path);
                self.events.publish(SoundEvent::AssetLoaded {
                    asset_path: asset_path.to_string(),
                });
                Ok(())
            }
            Err(e) => {
                let message = e.describe();
                tracing::warn!("Failed to load {}: {}", asset_path, message);
                self.events.publish(SoundEvent::AssetLoadFailed {
                    asset_path: asset_path.to_string(),
                    message: message.clone(),
                });
                Err(message)
            }
        }
    }
}

impl<B: SoundBackend> Drop for AssetManager<B> {
    fn drop(&mut self) {
        self.unload_all();
    }
}
