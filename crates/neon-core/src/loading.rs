use std::time::Duration;

pub const LOADING_STEP: f32 = 0.1;
pub const LOADING_INTERVAL: Duration = Duration::from_millis(200);
pub const LOADING_HIDE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadingPhase {
    Filling,
    /// Full; waiting out the hide delay.
    Full,
    Hidden,
}

/// Loading bar progress: filled a step per interval, hidden after a delay.
#[derive(Clone, Debug)]
pub struct LoadingBar {
    progress: f32,
    phase: LoadingPhase,
}

impl Default for LoadingBar {
    fn default() -> Self {
        Self {
            progress: 0.0,
            phase: LoadingPhase::Filling,
        }
    }
}

impl LoadingBar {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn transform(&self) -> String {
        format!("scaleX({})", self.progress.min(1.0))
    }

    /// One interval elapsed. Returns true when the bar just became full and
    /// the caller should schedule [`LoadingBar::hide`].
    pub fn step(&mut self) -> bool {
        if self.phase != LoadingPhase::Filling {
            return false;
        }
        self.progress = (self.progress + LOADING_STEP).min(1.0);
        // 10 additions of 0.1 land just under 1.0 in f32
        if self.progress >= 1.0 - 1e-4 {
            self.progress = 1.0;
            self.phase = LoadingPhase::Full;
            return true;
        }
        false
    }

    pub fn hide(&mut self) {
        self.phase = LoadingPhase::Hidden;
    }

    pub fn is_filling(&self) -> bool {
        self.phase == LoadingPhase::Filling
    }
}
