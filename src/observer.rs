use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pathing_grid::PathingGrid;

/// Called synchronously by the search after every expansion and by path reconstruction after
/// every step back along the route. The grid is only lent out immutably, so an observer can
/// render it but never disturb the search. Returning [ControlFlow::Break] cancels the search;
/// it is ignored once reconstruction has started.
pub trait StepObserver {
    fn on_step(&mut self, grid: &PathingGrid) -> ControlFlow<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(&PathingGrid) -> ControlFlow<()>,
{
    fn on_step(&mut self, grid: &PathingGrid) -> ControlFlow<()> {
        self(grid)
    }
}

/// Observer for callers that only want the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _: &PathingGrid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Keeps a text snapshot of the grid at every step.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<String>,
}

impl StepObserver for FrameRecorder {
    fn on_step(&mut self, grid: &PathingGrid) -> ControlFlow<()> {
        self.frames.push(grid.to_string());
        ControlFlow::Continue(())
    }
}

/// Shared cancellation signal. Clones refer to the same flag, so one can be handed to an input
/// handler or another thread while the search runs.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
    /// Wraps `inner` so the search also stops once this flag is raised.
    pub fn watch<O: StepObserver>(&self, inner: O) -> Cancellable<O> {
        Cancellable {
            flag: self.clone(),
            inner,
        }
    }
}

#[derive(Debug)]
pub struct Cancellable<O> {
    flag: CancelFlag,
    pub inner: O,
}

impl<O: StepObserver> StepObserver for Cancellable<O> {
    fn on_step(&mut self, grid: &PathingGrid) -> ControlFlow<()> {
        // The inner observer runs first so it can raise the flag itself.
        let flow = self.inner.on_step(grid);
        if self.flag.is_cancelled() {
            ControlFlow::Break(())
        } else {
            flow
        }
    }
}
