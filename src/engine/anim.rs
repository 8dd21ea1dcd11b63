use std::collections::HashMap;

/// Length and looping mode of one named clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub length: f32,
    pub looping: bool,
}

/// Minimal clip player: the only things actors read back are which clip is
/// current and whether a one-shot clip is still running.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clips: HashMap<&'static str, Clip>,
    current: Option<&'static str>,
    position: f32,
}

impl AnimationPlayer {
    /// Build from a clip table of `(name, length, looping)`.
    pub fn new(table: &[(&'static str, f32, bool)]) -> Self {
        let clips = table
            .iter()
            .map(|&(name, length, looping)| (name, Clip { length, looping }))
            .collect();
        Self {
            clips,
            current: None,
            position: 0.0,
        }
    }

    /// Switch to `name`. Playing the clip that is already current does not
    /// restart it; unknown names are ignored.
    pub fn play(&mut self, name: &'static str) {
        if !self.clips.contains_key(name) {
            tracing::warn!(clip = name, "unknown animation clip");
            return;
        }
        if self.current == Some(name) && self.is_playing() {
            return;
        }
        self.current = Some(name);
        self.position = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        let Some(clip) = self.current_clip() else {
            return;
        };
        self.position += dt;
        if clip.looping && clip.length > 0.0 {
            self.position %= clip.length;
        } else {
            self.position = self.position.min(clip.length);
        }
    }

    /// Looping clips always play; one-shot clips play until their end.
    pub fn is_playing(&self) -> bool {
        match self.current_clip() {
            Some(clip) => clip.looping || self.position < clip.length,
            None => false,
        }
    }

    pub fn current(&self) -> Option<&'static str> {
        self.current
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    fn current_clip(&self) -> Option<Clip> {
        self.current.and_then(|name| self.clips.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIPS: &[(&str, f32, bool)] = &[("idle", 1.0, true), ("attack", 0.4, false)];

    #[test]
    fn one_shot_clip_finishes() {
        let mut anim = AnimationPlayer::new(CLIPS);
        anim.play("attack");
        assert!(anim.is_playing());
        anim.advance(0.3);
        assert!(anim.is_playing());
        anim.advance(0.2);
        assert!(!anim.is_playing());
    }

    #[test]
    fn looping_clip_never_finishes() {
        let mut anim = AnimationPlayer::new(CLIPS);
        anim.play("idle");
        anim.advance(5.5);
        assert!(anim.is_playing());
        assert!((anim.position() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn replaying_current_clip_does_not_restart() {
        let mut anim = AnimationPlayer::new(CLIPS);
        anim.play("idle");
        anim.advance(0.25);
        anim.play("idle");
        assert!((anim.position() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn replaying_a_finished_one_shot_restarts_it() {
        let mut anim = AnimationPlayer::new(CLIPS);
        anim.play("attack");
        anim.advance(1.0);
        anim.play("attack");
        assert!(anim.is_playing());
    }

    #[test]
    fn unknown_clip_is_ignored() {
        let mut anim = AnimationPlayer::new(CLIPS);
        anim.play("idle");
        anim.play("moonwalk");
        assert_eq!(anim.current(), Some("idle"));
    }
}
