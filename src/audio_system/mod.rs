/// Native sound subsystem
///
/// What the sound plugin runs on its worker thread:
///
/// ```text
/// AssetManager<B>
///   ├── loaded assets: asset reference -> B::Sound
///   └── B: SoundBackend
///         └── RodioBackend (default output device)
///               └── RodioSound (in-memory bytes + sink)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let backend = RodioBackend::try_default()?;
/// let mut manager = AssetManager::new(backend, "www", EventBus::new());
///
/// manager.preload(Some("click.wav"));
/// manager.play(Some("click.wav"), 0.8);
/// manager.unload(Some("click.wav"));
/// ```
pub mod backend;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use backend::SoundBackend;
pub use manager::AssetManager;
pub use player::{load_audio_data, RodioBackend, RodioSound};
