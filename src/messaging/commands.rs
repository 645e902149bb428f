/// Sound operations and their parsed native form
///
/// [`SoundOperation`] fixes the wire name of each operation the facade can issue.
/// [`SoundCommand`] is what the native side turns `(action, args)` back into.
use std::fmt;

use serde_json::Value;

/// Volume used when `playSound` gets no usable volume argument
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Operations understood by the sound plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundOperation {
    PreloadSound,
    PreloadMultiple,
    PlaySound,
    UnloadSound,
}

impl SoundOperation {
    pub const ALL: [SoundOperation; 4] = [
        SoundOperation::PreloadSound,
        SoundOperation::PreloadMultiple,
        SoundOperation::PlaySound,
        SoundOperation::UnloadSound,
    ];

    /// Action name on the native boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundOperation::PreloadSound => "preloadSound",
            SoundOperation::PreloadMultiple => "preloadMultiple",
            SoundOperation::PlaySound => "playSound",
            SoundOperation::UnloadSound => "unloadSound",
        }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == action)
    }
}

impl fmt::Display for SoundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One native sound request.
///
/// Paths that were not strings on the wire are kept as `None` so the plugin can
/// report them the way it reports any other bad argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundCommand {
    Preload { asset_path: Option<String> },
    PreloadMultiple { asset_paths: Vec<Option<String>> },
    Play { asset_path: Option<String>, volume: f64 },
    Unload { asset_path: Option<String> },
}

fn string_arg(args: &[Value], index: usize) -> Option<String> {
    args.get(index).and_then(Value::as_str).map(str::to_string)
}

/// Numbers, or strings holding a number; anything else falls back to `default`.
fn number_arg(args: &[Value], index: usize, default: f64) -> f64 {
    args.get(index)
        .and_then(|v| v.as_f64().or_else(|| v.as_str()?.trim().parse().ok()))
        .unwrap_or(default)
}

impl SoundCommand {
    /// Parse a native invocation. `None` for actions the plugin does not know.
    pub fn from_action(action: &str, args: &[Value]) -> Option<Self> {
        let command = match SoundOperation::from_action(action)? {
            SoundOperation::PreloadSound => SoundCommand::Preload {
                asset_path: string_arg(args, 0),
            },
            SoundOperation::PreloadMultiple => SoundCommand::PreloadMultiple {
                asset_paths: args.iter().map(|v| v.as_str().map(str::to_string)).collect(),
            },
            SoundOperation::PlaySound => SoundCommand::Play {
                asset_path: string_arg(args, 0),
                volume: number_arg(args, 1, DEFAULT_VOLUME),
            },
            SoundOperation::UnloadSound => SoundCommand::Unload {
                asset_path: string_arg(args, 0),
            },
        };
        Some(command)
    }

    pub fn operation(&self) -> SoundOperation {
        match self {
            SoundCommand::Preload { .. } => SoundOperation::PreloadSound,
            SoundCommand::PreloadMultiple { .. } => SoundOperation::PreloadMultiple,
            SoundCommand::Play { .. } => SoundOperation::PlaySound,
            SoundCommand::Unload { .. } => SoundOperation::UnloadSound,
        }
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        fn path(p: &Option<String>) -> &str {
            p.as_deref().unwrap_or("<missing>")
        }

        match self {
            SoundCommand::Preload { asset_path } => format!("Preload: {}", path(asset_path)),
            SoundCommand::PreloadMultiple { asset_paths } => {
                format!("Preload {} assets", asset_paths.len())
            }
            SoundCommand::Play { asset_path, volume } => {
                format!("Play: {} at {}", path(asset_path), volume)
            }
            SoundCommand::Unload { asset_path } => format!("Unload: {}", path(asset_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_names_round_trip() {
        for op in SoundOperation::ALL {
            assert_eq!(SoundOperation::from_action(op.as_str()), Some(op));
        }
        assert_eq!(SoundOperation::from_action("stopSound"), None);
        assert_eq!(SoundOperation::PlaySound.to_string(), "playSound");
    }

    #[test]
    fn test_parse_play_with_defaults() {
        let cmd = SoundCommand::from_action("playSound", &[json!("beep.wav")]).unwrap();
        assert_eq!(
            cmd,
            SoundCommand::Play {
                asset_path: Some("beep.wav".to_string()),
                volume: 1.0
            }
        );

        let cmd = SoundCommand::from_action("playSound", &[json!("beep.wav"), json!("0.25")])
            .unwrap();
        assert!(matches!(cmd, SoundCommand::Play { volume, .. } if volume == 0.25));

        let cmd = SoundCommand::from_action("playSound", &[json!("beep.wav"), json!(true)])
            .unwrap();
        assert!(matches!(cmd, SoundCommand::Play { volume, .. } if volume == 1.0));
    }

    #[test]
    fn test_parse_non_string_paths() {
        let cmd = SoundCommand::from_action("preloadSound", &[json!(42)]).unwrap();
        assert_eq!(cmd, SoundCommand::Preload { asset_path: None });

        let cmd = SoundCommand::from_action("unloadSound", &[]).unwrap();
        assert_eq!(cmd, SoundCommand::Unload { asset_path: None });

        let cmd = SoundCommand::from_action(
            "preloadMultiple",
            &[json!("a.wav"), json!(null), json!("a.wav")],
        )
        .unwrap();
        assert_eq!(
            cmd,
            SoundCommand::PreloadMultiple {
                asset_paths: vec![Some("a.wav".to_string()), None, Some("a.wav".to_string())]
            }
        );
    }

    #[test]
    fn test_unknown_action() {
        assert!(SoundCommand::from_action("rewind", &[json!("a.wav")]).is_none());
    }

    #[test]
    fn test_command_description() {
        let cmd = SoundCommand::Unload { asset_path: None };
        assert_eq!(cmd.description(), "Unload: <missing>");
        assert_eq!(cmd.operation(), SoundOperation::UnloadSound);

        let cmd = SoundCommand::PreloadMultiple {
            asset_paths: vec![None, None],
        };
        assert_eq!(cmd.description(), "Preload 2 assets");
    }
}
