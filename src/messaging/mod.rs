/// Messaging for the native sound plugin
///
/// - **Commands**: typed sound requests parsed from native calls
/// - **Events**: notifications of what the plugin did, broadcast on the bus
///
/// ## Architecture
///
/// ```text
/// ┌────────────────┐  SoundCommand  ┌─────────────────┐  SoundEvent  ┌──────────┐
/// │ UiSoundsPlugin │ ─────────────> │ CommandExecutor │ ───────────> │ EventBus │
/// │ (bridge side)  │                │ (worker thread) │              │          │
/// └────────────────┘                └─────────────────┘              └──────────┘
///                                            │ PluginResult
///                                            ▼
///                                     CallbackContext
/// ```
pub mod bus;
pub mod commands;
pub mod events;
pub mod executor;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::{SoundCommand, SoundOperation, DEFAULT_VOLUME};
pub use events::SoundEvent;
pub use executor::CommandExecutor;
