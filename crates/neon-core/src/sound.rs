//! Sound cues the scene can trigger, and the seam to whatever plays them.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Hover,
    Click,
    Ambient,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Hover, SoundCue::Click, SoundCue::Ambient];

    pub fn path(self) -> &'static str {
        match self {
            SoundCue::Hover => "sounds/hover.mp3",
            SoundCue::Click => "sounds/click.mp3",
            SoundCue::Ambient => "sounds/ambient.mp3",
        }
    }

    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Hover => 0.5,
            SoundCue::Click => 0.5,
            SoundCue::Ambient => 0.2,
        }
    }

    pub fn looped(self) -> bool {
        matches!(self, SoundCue::Ambient)
    }
}

/// Fire-and-forget playback. Implementations swallow failures (missing
/// buffer, autoplay policy); the caller never waits on or hears about them.
pub trait AudioSink {
    fn play(&self, cue: SoundCue);
    fn stop(&self, cue: SoundCue);
}

/// Sink that drops everything; used before audio is wired and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&self, _cue: SoundCue) {}
    fn stop(&self, _cue: SoundCue) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnceState {
    #[default]
    Idle,
    /// Asked for before its buffer arrived.
    Waiting,
    Started,
}

/// Start-once gate for a cue whose buffer may still be loading. A request
/// made too early is remembered and honoured when the buffer lands.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayOnce {
    state: OnceState,
}

impl PlayOnce {
    pub fn state(&self) -> OnceState {
        self.state
    }

    /// A gesture asked for the cue. Returns true when it should start now.
    pub fn request(&mut self, loaded: bool) -> bool {
        match self.state {
            OnceState::Started => false,
            _ if loaded => {
                self.state = OnceState::Started;
                true
            }
            _ => {
                self.state = OnceState::Waiting;
                false
            }
        }
    }

    /// The buffer finished decoding. Returns true if a request was waiting.
    pub fn loaded(&mut self) -> bool {
        if self.state == OnceState::Waiting {
            self.state = OnceState::Started;
            true
        } else {
            false
        }
    }
}
