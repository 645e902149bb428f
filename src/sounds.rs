/// Sound-asset facade
///
/// The public entry points for preloading, playing and unloading sounds. Every
/// method returns immediately with a [`PendingCall`] that settles once the native
/// sound layer answers.
///
/// Calls are independent: nothing here orders or serializes them. A caller that
/// needs a sound loaded before it plays must wait for the preload first. Playing
/// an asset that was never preloaded is left to the native layer; the bundled
/// plugin loads it on demand.
use serde_json::Value;

use crate::bridge::{NativeBridge, PendingCall};
use crate::config::{SoundsConfig, DEFAULT_SERVICE_NAME};
use crate::messaging::SoundOperation;

#[derive(Debug, Clone)]
pub struct UiSounds {
    bridge: NativeBridge,
    service_name: String,
}

impl UiSounds {
    /// Facade for the plugin registered under the default service name
    pub fn new(bridge: NativeBridge) -> Self {
        Self::with_service_name(bridge, DEFAULT_SERVICE_NAME)
    }

    pub fn with_service_name(bridge: NativeBridge, service_name: impl Into<String>) -> Self {
        Self {
            bridge,
            service_name: service_name.into(),
        }
    }

    pub fn from_config(bridge: NativeBridge, config: &SoundsConfig) -> Self {
        Self::with_service_name(bridge, config.service_name.clone())
    }

    pub fn bridge(&self) -> &NativeBridge {
        &self.bridge
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Ask the native layer to load and cache an asset.
    pub fn preload_sound(&self, asset_path: &str) -> PendingCall<()> {
        self.call(SoundOperation::PreloadSound, vec![Value::from(asset_path)])
    }

    /// Preload several assets in one native call.
    ///
    /// The paths become the argument list as given: order and duplicates are kept
    /// and an empty list is still sent.
    pub fn preload_multiple<I, S>(&self, asset_paths: I) -> PendingCall<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = asset_paths
            .into_iter()
            .map(|path| Value::String(path.into()))
            .collect();
        self.call(SoundOperation::PreloadMultiple, args)
    }

    /// Play an asset at `volume`. The volume is not checked here.
    ///
    /// JSON has no NaN or infinity, so a non-finite volume reaches the native
    /// layer as `null`.
    pub fn play_sound(&self, asset_path: &str, volume: f64) -> PendingCall<()> {
        self.call(
            SoundOperation::PlaySound,
            vec![Value::from(asset_path), Value::from(volume)],
        )
    }

    /// Ask the native layer to release an asset.
    pub fn unload_sound(&self, asset_path: &str) -> PendingCall<()> {
        self.call(SoundOperation::UnloadSound, vec![Value::from(asset_path)])
    }

    fn call(&self, operation: SoundOperation, args: Vec<Value>) -> PendingCall<()> {
        self.bridge
            .call(&self.service_name, operation.as_str(), args)
            .discard_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{CallbackContext, NativeHandler};
    use crate::error::NativeCallError;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl NativeHandler for Recorder {
        fn execute(&self, action: &str, args: Vec<Value>, callback: CallbackContext) -> bool {
            self.calls.lock().push((action.to_string(), args));
            callback.success(json!("ok"));
            true
        }
    }

    fn facade() -> (UiSounds, Arc<Recorder>) {
        let bridge = NativeBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register("UISounds", recorder.clone());
        (UiSounds::new(bridge), recorder)
    }

    #[test]
    fn test_each_operation_issues_one_call() {
        let (sounds, recorder) = facade();

        assert_eq!(sounds.preload_sound("beep.wav").wait(), Ok(()));
        assert_eq!(sounds.play_sound("beep.wav", 0.5).wait(), Ok(()));
        assert_eq!(sounds.unload_sound("beep.wav").wait(), Ok(()));

        let calls = recorder.calls.lock();
        assert_eq!(
            *calls,
            vec![
                ("preloadSound".to_string(), vec![json!("beep.wav")]),
                ("playSound".to_string(), vec![json!("beep.wav"), json!(0.5)]),
                ("unloadSound".to_string(), vec![json!("beep.wav")]),
            ]
        );
    }

    #[test]
    fn test_preload_multiple_forwards_list() {
        let (sounds, recorder) = facade();

        sounds.preload_multiple(["a.wav", "b.wav", "a.wav"]).wait().unwrap();
        sounds.preload_multiple(Vec::<String>::new()).wait().unwrap();

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].1, vec![json!("a.wav"), json!("b.wav"), json!("a.wav")]);
        assert_eq!(calls[1], ("preloadMultiple".to_string(), vec![]));
    }

    #[test]
    fn test_custom_service_name() {
        let bridge = NativeBridge::new();
        let recorder = Arc::new(Recorder::default());
        bridge.register("MenuSounds", recorder.clone());

        let mut config = SoundsConfig::default();
        config.service_name = "MenuSounds".to_string();
        let sounds = UiSounds::from_config(bridge, &config);

        assert_eq!(sounds.service_name(), "MenuSounds");
        assert_eq!(sounds.preload_sound("a.wav").wait(), Ok(()));
        assert_eq!(recorder.calls.lock().len(), 1);
    }

    #[test]
    fn test_without_native_handler() {
        let sounds = UiSounds::new(NativeBridge::new());
        assert_eq!(
            sounds.play_sound("beep.wav", 1.0).wait(),
            Err(NativeCallError::HandlerUnavailable {
                target: "UISounds".to_string()
            })
        );
    }

    #[test]
    fn test_non_finite_volume_sent_as_null() {
        let (sounds, recorder) = facade();
        sounds.play_sound("beep.wav", f64::NAN).wait().unwrap();
        assert_eq!(recorder.calls.lock()[0].1, vec![json!("beep.wav"), Value::Null]);
    }
}
