/// Native sound plugin
///
/// The [`NativeHandler`] behind the sound facade: parses each call into a
/// [`SoundCommand`] and queues it on the worker thread.
use std::sync::Arc;

use serde_json::Value;

use crate::audio_system::{AssetManager, RodioBackend, SoundBackend};
use crate::bridge::{CallbackContext, NativeBridge, NativeHandler};
use crate::config::SoundsConfig;
use crate::error::AudioError;
use crate::messaging::{CommandExecutor, EventBus, SoundCommand};

pub struct UiSoundsPlugin {
    executor: CommandExecutor,
}

impl UiSoundsPlugin {
    /// Start the plugin with a backend built on its worker thread.
    pub fn spawn<B, F>(config: &SoundsConfig, events: EventBus, make_backend: F) -> Result<Self, AudioError>
    where
        B: SoundBackend + 'static,
        F: FnOnce() -> Result<B, AudioError> + Send + 'static,
    {
        let asset_root = config.asset_root.clone();
        let executor = CommandExecutor::spawn(move || {
            let backend = make_backend()?;
            Ok(AssetManager::new(backend, asset_root, events))
        })?;

        tracing::info!("{}: plugin is created", config.service_name);
        Ok(Self { executor })
    }

    /// Start the plugin on the default audio output device.
    pub fn with_rodio(config: &SoundsConfig, events: EventBus) -> Result<Self, AudioError> {
        Self::spawn(config, events, RodioBackend::try_default)
    }
}

impl NativeHandler for UiSoundsPlugin {
    fn execute(&self, action: &str, args: Vec<Value>, callback: CallbackContext) -> bool {
        let Some(command) = SoundCommand::from_action(action, &args) else {
            return false;
        };

        if !self.executor.submit(command, callback) {
            tracing::error!("Sound worker is gone, dropping '{}'", action);
        }
        true
    }
}

/// Register a rodio-backed sound plugin on `bridge` under `config.service_name`.
pub fn install_native_sounds(
    bridge: &NativeBridge,
    config: &SoundsConfig,
    events: EventBus,
) -> Result<(), AudioError> {
    let plugin = UiSoundsPlugin::with_rodio(config, events)?;
    bridge.register(config.service_name.clone(), Arc::new(plugin));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::pending_call;
    use crate::error::NativeCallError;
    use serde_json::json;
    use std::path::Path;

    struct NullBackend;

    impl SoundBackend for NullBackend {
        type Sound = ();

        fn load(&mut self, _path: &Path) -> Result<(), AudioError> {
            Ok(())
        }

        fn play(&mut self, _sound: &mut (), _volume: f32) -> Result<(), AudioError> {
            Ok(())
        }

        fn release(&mut self, _sound: ()) {}
    }

    fn plugin() -> UiSoundsPlugin {
        UiSoundsPlugin::spawn(&SoundsConfig::default(), EventBus::new(), || Ok(NullBackend)).unwrap()
    }

    #[test]
    fn test_unknown_action_not_accepted() {
        let plugin = plugin();
        let (_pending, callback) = pending_call("UISounds", "rewind");
        assert!(!plugin.execute("rewind", vec![], callback));
    }

    #[test]
    fn test_execute_answers_through_callback() {
        let plugin = plugin();
        let (pending, callback) = pending_call("UISounds", "playSound");

        assert!(plugin.execute("playSound", vec![json!("beep.wav"), json!(2.0)], callback));
        assert_eq!(
            pending.wait(),
            Err(NativeCallError::Rejected(json!(
                "UISounds: Volume must be >= 0.0 and <= 1.0"
            )))
        );
    }

    #[test]
    fn test_backend_failure_fails_spawn() {
        let result = UiSoundsPlugin::spawn::<NullBackend, _>(
            &SoundsConfig::default(),
            EventBus::new(),
            || Err(AudioError::StreamInitFailed("no output device".into())),
        );
        assert!(result.is_err());
    }
}
