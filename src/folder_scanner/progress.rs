use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// Running file counts per phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub scanned: usize,
    pub partial_hashed: usize,
    pub full_hashed: usize,
}

/// Told about every unit of work the pipeline finishes.
pub trait ProgressObserver {
    fn update(&mut self, progress: &Progress);

    fn finish(&mut self, _progress: &Progress) {}
}

pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _progress: &Progress) {}
}

/// Spinner on stderr showing the three phase counters.
pub struct ConsoleProgress {
    bar: ProgressBar,
    last_update: Option<Instant>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(ProgressStyle::default_spinner());
        ConsoleProgress {
            bar,
            last_update: None,
        }
    }

    fn render(&self, progress: &Progress) {
        self.bar.set_message(format!(
            "Phase #1: {}  Phase #2: {}  Phase #3: {}",
            progress.scanned, progress.partial_hashed, progress.full_hashed
        ));
        self.bar.tick();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn update(&mut self, progress: &Progress) {
        let now = Instant::now();
        if let Some(last) = self.last_update {
            if now.duration_since(last) < UPDATE_INTERVAL {
                return;
            }
        }
        self.render(progress);
        self.last_update = Some(now);
    }

    fn finish(&mut self, progress: &Progress) {
        self.render(progress);
        self.bar.finish_and_clear();
    }
}
