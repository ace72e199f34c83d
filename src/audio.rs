//! Sound cues
//!
//! The simulation never plays audio. It reports events, and this module turns
//! consecutive snapshots into cues for whatever [`AudioTrigger`] the embedder
//! provides.

use crate::sim::{GameEvent, Snapshot};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Apple eaten
    Eat,
    /// Wall or self collision
    Crash,
    /// Level increased
    LevelUp,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Eat => "eat",
            SoundEffect::Crash => "crash",
            SoundEffect::LevelUp => "level-up",
        }
    }

    /// Cues for the transition from `previous` to `current`
    pub fn cues(previous: Option<&Snapshot>, current: &Snapshot) -> Vec<SoundEffect> {
        let mut cues = Vec::new();
        match current.event {
            GameEvent::AteApple => {
                cues.push(SoundEffect::Eat);
                if previous.is_some_and(|p| current.level > p.level) {
                    cues.push(SoundEffect::LevelUp);
                }
            }
            GameEvent::Collided(_) => cues.push(SoundEffect::Crash),
            GameEvent::None => {}
        }
        cues
    }
}

/// Implemented by the embedder's audio backend
pub trait AudioTrigger {
    fn play(&mut self, effect: SoundEffect);

    /// Play every cue for this tick
    fn observe(&mut self, previous: Option<&Snapshot>, current: &Snapshot) {
        for effect in SoundEffect::cues(previous, current) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{CollisionKind, GameState};

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioTrigger for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn snapshot_with(event: GameEvent, level: u32) -> Snapshot {
        let mut snap = GameState::new(Settings::classic()).snapshot();
        snap.event = event;
        snap.level = level;
        snap
    }

    #[test]
    fn test_quiet_tick() {
        let snap = snapshot_with(GameEvent::None, 1);
        assert!(SoundEffect::cues(None, &snap).is_empty());
    }

    #[test]
    fn test_eat_and_level_up() {
        let before = snapshot_with(GameEvent::None, 1);
        let after = snapshot_with(GameEvent::AteApple, 2);
        let mut audio = Recorder::default();
        audio.observe(Some(&before), &after);
        assert_eq!(audio.0, vec![SoundEffect::Eat, SoundEffect::LevelUp]);

        let same_level = snapshot_with(GameEvent::AteApple, 1);
        assert_eq!(
            SoundEffect::cues(Some(&before), &same_level),
            vec![SoundEffect::Eat]
        );
    }

    #[test]
    fn test_crash() {
        let snap = snapshot_with(GameEvent::Collided(CollisionKind::Wall), 1);
        let mut audio = Recorder::default();
        audio.observe(None, &snap);
        assert_eq!(audio.0, vec![SoundEffect::Crash]);
        assert_eq!(audio.0[0].as_str(), "crash");
    }
}
