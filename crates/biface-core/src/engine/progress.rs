/// Events emitted by workflows and the checking pipeline while they run.
///
/// Front ends map these to spinners, bars or log lines; the library never prints.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named step began (loading a file, one checking stage, the interface search).
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A countable task inside the current phase.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// A one-line result worth showing to the user, such as a stage summary.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `step` between a `PhaseStart` and a `PhaseFinish` event.
    ///
    /// The finish event is sent whatever `step` returns, so a failing step never leaves
    /// a spinner running.
    pub fn phase<T>(&self, name: &'static str, step: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let outcome = step();
        self.report(Progress::PhaseFinish);
        outcome
    }
}
