/// Command executor
///
/// Runs sound commands on a dedicated worker thread and answers each one through
/// its callback.
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Sender};

use super::commands::SoundCommand;
use super::events::SoundEvent;
use crate::audio_system::{AssetManager, SoundBackend};
use crate::bridge::CallbackContext;
use crate::error::AudioError;

struct Job {
    command: SoundCommand,
    callback: CallbackContext,
}

/// Owns the worker thread of the native sound plugin.
///
/// Commands run one at a time in submission order. Dropping the executor lets
/// queued commands finish, releases every loaded sound and joins the thread.
pub struct CommandExecutor {
    job_tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl CommandExecutor {
    /// Start the worker thread.
    ///
    /// `make_manager` runs on the worker itself, so backends holding non-`Send`
    /// audio streams work. Its error is returned here.
    pub fn spawn<B, F>(make_manager: F) -> Result<Self, AudioError>
    where
        B: SoundBackend + 'static,
        F: FnOnce() -> Result<AssetManager<B>, AudioError> + Send + 'static,
    {
        let (job_tx, job_rx) = unbounded::<Job>();
        let (ready_tx, ready_rx) = bounded::<Result<(), AudioError>>(1);

        let handle = thread::Builder::new()
            .name("ui-sounds-native".to_string())
            .spawn(move || {
                let mut manager = match make_manager() {
                    Ok(manager) => {
                        let _ = ready_tx.send(Ok(()));
                        manager
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                tracing::info!("Sound executor thread started");

                while let Ok(job) = job_rx.recv() {
                    tracing::debug!("Executing command: {}", job.command.description());
                    let result = manager.execute(&job.command);
                    job.callback.send_plugin_result(result);
                }

                manager.unload_all();
                manager.events().publish(SoundEvent::Shutdown);
                tracing::info!("Sound executor thread stopped");
            })
            .map_err(AudioError::WorkerSpawnFailed)?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                job_tx: Some(job_tx),
                handle: Some(handle),
            }),
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(AudioError::WorkerStopped)
            }
        }
    }

    /// Queue a command. Returns `false` if the worker is gone, in which case the
    /// callback is dropped unanswered.
    pub fn submit(&self, command: SoundCommand, callback: CallbackContext) -> bool {
        let Some(job_tx) = &self.job_tx else {
            return false;
        };
        job_tx.send(Job { command, callback }).is_ok()
    }
}

impl Drop for CommandExecutor {
    fn drop(&mut self) {
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}
