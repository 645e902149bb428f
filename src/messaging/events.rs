/// Event types for the native sound plugin
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers.

/// Sound plugin events
#[derive(Debug, Clone, PartialEq)]
pub enum SoundEvent {
    /// An asset was loaded into the backend
    AssetLoaded { asset_path: String },

    /// Loading an asset failed
    AssetLoadFailed { asset_path: String, message: String },

    /// Playback of an asset started
    PlaybackStarted { asset_path: String, volume: f32 },

    /// An asset was released
    AssetUnloaded { asset_path: String },

    /// The native worker is shutting down
    Shutdown,
}

impl SoundEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            SoundEvent::AssetLoaded { asset_path } => format!("Loaded {}", asset_path),
            SoundEvent::AssetLoadFailed {
                asset_path,
                message,
            } => format!("Failed to load {}: {}", asset_path, message),
            SoundEvent::PlaybackStarted { asset_path, volume } => {
                format!("Playing {} at {}", asset_path, volume)
            }
            SoundEvent::AssetUnloaded { asset_path } => format!("Unloaded {}", asset_path),
            SoundEvent::Shutdown => "Shutting down".to_string(),
        }
    }
}
