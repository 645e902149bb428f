//! UI sound bridge
//!
//! Preload, play and unload short interface sounds through a native sound layer.
//! The [`UiSounds`] facade turns each request into a call on the [`NativeBridge`],
//! which hands it to whatever [`NativeHandler`] is registered for the target and
//! returns a [`PendingCall`] that settles exactly once.
//!
//! ```rust,ignore
//! let bridge = NativeBridge::new();
//! install_native_sounds(&bridge, &SoundsConfig::default(), EventBus::new())?;
//!
//! let sounds = UiSounds::new(bridge);
//! sounds.preload_sound("click.wav").wait()?;
//! sounds.play_sound("click.wav", 0.8).wait()?;
//! ```

pub mod audio_system;
pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod plugin;
pub mod sounds;

pub use bridge::{CallbackContext, NativeBridge, NativeHandler, PendingCall, PluginResult};
pub use config::{LoggingConfig, SoundsConfig};
pub use error::{AudioError, ConfigError, NativeCallError};
pub use logging::init_logging;
pub use messaging::{EventBus, SoundEvent, SoundOperation};
pub use plugin::{install_native_sounds, UiSoundsPlugin};
pub use sounds::UiSounds;
