//! Audio planning
//!
//! The simulation never touches an audio device. This module turns drained
//! game events into commands for whatever playback collaborator sits
//! outside the crate: pick a music track per level, stop on a terminal
//! transition.

use crate::sim::GameEvent;

/// Instruction for the external playback collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    /// Start (or restart) the background track with this index
    PlayMusic { track: u32 },
    /// Stop all playback
    StopMusic,
}

/// Track index for a level, capped at the configured maximum
pub fn track_for_level(level: u32, max_track: u32) -> u32 {
    level.saturating_sub(1).min(max_track)
}

/// Map one tick's events onto playback commands
pub fn plan(events: &[GameEvent], max_track: u32) -> Vec<AudioCommand> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::LevelUp { level } => Some(AudioCommand::PlayMusic {
                track: track_for_level(*level, max_track),
            }),
            GameEvent::GameOver | GameEvent::Win => Some(AudioCommand::StopMusic),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_selects_matching_track() {
        let commands = plan(&[GameEvent::LevelUp { level: 2 }], 5);
        assert_eq!(commands, vec![AudioCommand::PlayMusic { track: 1 }]);
    }

    #[test]
    fn track_index_caps_at_max() {
        assert_eq!(track_for_level(1, 5), 0);
        assert_eq!(track_for_level(6, 5), 5);
        assert_eq!(track_for_level(40, 5), 5);
    }

    #[test]
    fn terminal_events_stop_playback() {
        assert_eq!(plan(&[GameEvent::GameOver], 5), vec![AudioCommand::StopMusic]);
        assert_eq!(plan(&[GameEvent::Win], 5), vec![AudioCommand::StopMusic]);
    }

    #[test]
    fn unrelated_events_are_silent() {
        assert!(plan(&[GameEvent::PowerUpCollected], 5).is_empty());
        assert!(plan(&[GameEvent::NewHighScore { score: 3 }], 5).is_empty());
    }
}
