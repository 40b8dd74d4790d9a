use core::time::Duration;

use web_time::Instant;

/// Elapsed-time tracker for a session.
///
/// There is no running timer: elapsed time is the banked duration plus the time since the
/// anchor, when the clock is running. Only readers round down to whole seconds.
#[derive(Copy, Clone, Debug, Default)]
pub struct Clock {
    banked: Duration,
    anchor: Option<Instant>,
}

impl Clock {
    /// Stopped clock showing `secs`, as restored from a save file.
    pub const fn stopped_at(secs: u32) -> Self {
        Self {
            banked: Duration::from_secs(secs as u64),
            anchor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match self.anchor {
            Some(anchor) => self.banked.saturating_add(anchor.elapsed()),
            None => self.banked,
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        u32::try_from(self.elapsed().as_secs()).unwrap_or(u32::MAX)
    }

    /// Starts or resumes the clock, no-op when already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(Instant::now());
        }
    }

    /// Banks the elapsed time and stops the clock.
    pub fn stop(&mut self) {
        self.banked = self.elapsed();
        self.anchor = None;
    }

    /// Banks the elapsed time and re-anchors a running clock at now.
    pub fn checkpoint(&mut self) {
        if let Some(anchor) = self.anchor {
            let now = Instant::now();
            self.banked = self.banked.saturating_add(now.duration_since(anchor));
            self.anchor = Some(now);
        }
    }

    /// Whole seconds banked at the last stop or checkpoint.
    pub fn banked_secs(&self) -> u32 {
        u32::try_from(self.banked.as_secs()).unwrap_or(u32::MAX)
    }
}

/// Two clocks are equal when they bank the same whole seconds and agree on running; the
/// anchor instant and sub-second remainder are not observable.
impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        self.banked_secs() == other.banked_secs() && self.is_running() == other.is_running()
    }
}

impl Eq for Clock {}
