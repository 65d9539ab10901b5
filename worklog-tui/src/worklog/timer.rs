use super::outcome::{Toast, Tone};

/// Which timer controls currently accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerControls {
    pub start: bool,
    pub pause: bool,
    pub stop: bool,
}

/// Elapsed-time counter driven by one tick per second while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkTimer {
    elapsed_seconds: u64,
    running: bool,
    controls: TimerControls,
}

impl Default for WorkTimer {
    fn default() -> Self {
        Self::with_elapsed(0)
    }
}

impl WorkTimer {
    /// A stopped timer that resumes from time already tracked.
    pub fn with_elapsed(elapsed_seconds: u64) -> Self {
        Self {
            elapsed_seconds,
            running: false,
            controls: TimerControls {
                start: true,
                pause: false,
                stop: false,
            },
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controls(&self) -> TimerControls {
        self.controls
    }

    /// No-op while running.
    pub fn start(&mut self) -> Option<Toast> {
        if self.running {
            return None;
        }
        self.running = true;
        self.controls = TimerControls {
            start: false,
            pause: true,
            stop: true,
        };
        Some(Toast::new(Tone::Success, "Timer started"))
    }

    /// No-op unless running.
    pub fn pause(&mut self) -> Option<Toast> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.controls.start = true;
        self.controls.pause = false;
        Some(Toast::new(Tone::Info, "Timer paused"))
    }

    /// Halts unconditionally and disables itself until the next start. The
    /// elapsed count is kept.
    pub fn stop(&mut self) -> Toast {
        self.running = false;
        self.controls = TimerControls {
            start: true,
            pause: false,
            stop: false,
        };
        Toast::new(Tone::Info, "Timer stopped")
    }

    /// One interval callback. Ignored while not running.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds += 1;
        }
    }

    pub fn display(&self) -> String {
        format_hms(self.elapsed_seconds)
    }

    pub fn display_hours(&self) -> String {
        format!("{} hours", format_decimal_hours(self.elapsed_seconds))
    }
}

/// Zero-padded `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// `seconds / 3600` to one decimal, rounded from the nearest `f64` the way
/// browsers format fixed-point numbers.
pub fn format_decimal_hours(total_seconds: u64) -> String {
    // Odd quarter hours are the only exact ties; those round up, not to even.
    if total_seconds % 900 == 0 && (total_seconds / 900) % 2 == 1 {
        let tenths = (total_seconds / 900 * 5 + 1) / 2;
        return format!("{}.{}", tenths / 10, tenths % 10);
    }
    format!("{:.1}", total_seconds as f64 / 3600.0)
}
