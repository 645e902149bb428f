/// Rodio sound backend
///
/// Assets are read into memory once and checked by decoding them. Every play
/// builds a fresh decoder from the in-memory bytes on a new sink.
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::backend::SoundBackend;
use crate::error::AudioError;

/// Read an audio file into memory and verify it decodes.
pub fn load_audio_data(path: &Path) -> Result<Arc<Vec<u8>>, AudioError> {
    let audio_data = std::fs::read(path).map_err(|e| AudioError::LoadFailed {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;

    // Decoder requires owned data with 'static lifetime
    let cursor = Cursor::new(audio_data.clone());
    let decoder = Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))?;
    tracing::debug!(
        "Decoded {}: {} channel(s) at {} Hz",
        path.display(),
        decoder.channels(),
        decoder.sample_rate()
    );

    tracing::info!(
        "Preloaded audio file: {} ({} bytes)",
        path.display(),
        audio_data.len()
    );
    Ok(Arc::new(audio_data))
}

/// A preloaded sound and the sink of its latest playback
pub struct RodioSound {
    audio_data: Arc<Vec<u8>>,
    sink: Option<Sink>,
}

impl RodioSound {
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }
}

/// Plays sounds on the default output device
pub struct RodioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
        tracing::info!("Opened default audio output stream");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl SoundBackend for RodioBackend {
    type Sound = RodioSound;

    fn load(&mut self, path: &Path) -> Result<RodioSound, AudioError> {
        Ok(RodioSound {
            audio_data: load_audio_data(path)?,
            sink: None,
        })
    }

    fn play(&mut self, sound: &mut RodioSound, volume: f32) -> Result<(), AudioError> {
        let cursor = Cursor::new((*sound.audio_data).clone());
        let decoder = Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))?;

        // Restart rather than overlap
        if sound.is_playing() {
            tracing::debug!("Restarting sound still playing");
        }
        if let Some(previous) = sound.sink.take() {
            previous.stop();
        }

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(decoder);
        sink.play();
        sound.sink = Some(sink);

        Ok(())
    }

    fn release(&mut self, sound: RodioSound) {
        if let Some(sink) = sound.sink {
            sink.stop();
        }
    }
}
