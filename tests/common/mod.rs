// Shared test doubles for the integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use ui_sounds::audio_system::SoundBackend;
use ui_sounds::{AudioError, CallbackContext, NativeBridge, NativeHandler, UiSounds};

/// One call seen by [`ScriptedHandler`]
pub struct RecordedCall {
    pub action: String,
    pub args: Vec<Value>,
    pub callback: CallbackContext,
}

/// Native handler that records every call and leaves answering to the test
#[derive(Default)]
pub struct ScriptedHandler {
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedHandler {
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// (action, args) of call `index`
    pub fn call(&self, index: usize) -> (String, Vec<Value>) {
        let calls = self.calls.lock();
        (calls[index].action.clone(), calls[index].args.clone())
    }

    pub fn callback(&self, index: usize) -> CallbackContext {
        self.calls.lock()[index].callback.clone()
    }
}

impl NativeHandler for ScriptedHandler {
    fn execute(&self, action: &str, args: Vec<Value>, callback: CallbackContext) -> bool {
        self.calls.lock().push(RecordedCall {
            action: action.to_string(),
            args,
            callback,
        });
        true
    }
}

pub fn scripted_sounds() -> (UiSounds, Arc<ScriptedHandler>) {
    let bridge = NativeBridge::new();
    let handler = Arc::new(ScriptedHandler::default());
    bridge.register("UISounds", handler.clone());
    (UiSounds::new(bridge), handler)
}

/// What [`RecordingBackend`] was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum BackendOp {
    Load(PathBuf),
    Play(PathBuf, f32),
    Release(PathBuf),
}

/// Sound backend that only checks the file exists, and records every operation
pub struct RecordingBackend {
    log: Arc<Mutex<Vec<BackendOp>>>,
}

impl RecordingBackend {
    pub fn new() -> (Self, Arc<Mutex<Vec<BackendOp>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

impl SoundBackend for RecordingBackend {
    type Sound = PathBuf;

    fn load(&mut self, path: &Path) -> Result<PathBuf, AudioError> {
        if !path.exists() {
            return Err(AudioError::LoadFailed {
                path: path.display().to_string(),
                source: "file not found".into(),
            });
        }
        self.log.lock().push(BackendOp::Load(path.to_path_buf()));
        Ok(path.to_path_buf())
    }

    fn play(&mut self, sound: &mut PathBuf, volume: f32) -> Result<(), AudioError> {
        self.log.lock().push(BackendOp::Play(sound.clone(), volume));
        Ok(())
    }

    fn release(&mut self, sound: PathBuf) {
        self.log.lock().push(BackendOp::Release(sound));
    }
}
