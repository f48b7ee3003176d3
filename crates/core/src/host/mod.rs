//! Host integration: frame scheduling and the mount/unmount lifecycle
//!
//! The animation runs one frame per host callback, the way a browser drives
//! `requestAnimationFrame`. [`Animation`] holds the single pending request and
//! cancels it when unmounted or dropped, so a torn-down visualization can
//! never leave a live loop behind, including during unwinding.

mod timer;

pub use timer::{FrameScope, FrameTimer};

use crate::core_types::FrameClock;
use crate::field::FrameReport;
use crate::render::Surface;
use crate::simulation::BushSimulation;
use tracing::{debug, info};

/// Handle of one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequest(pub u64);

/// Source of frame callbacks
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameRequest {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        (**self).cancel_frame(request);
    }
}

/// Scheduler whose callbacks fire only when the caller takes them.
///
/// Headless renders and tests pump it in a loop; it also counts requests and
/// cancellations so lifecycle leaks are observable.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the pending callback, if any, handing its request to the caller.
    pub fn take_pending(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Total `request_frame` calls
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total `cancel_frame` calls
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        self.requested += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.cancelled += 1;
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}

/// A simulation mounted on a host scheduler
pub struct Animation<S: FrameScheduler> {
    simulation: BushSimulation,
    scheduler: S,
    pending: Option<FrameRequest>,
    timer: FrameTimer,
}

impl<S: FrameScheduler> Animation<S> {
    /// Mount `simulation` and request its first frame.
    pub fn mount(simulation: BushSimulation, mut scheduler: S) -> Self {
        let pending = Some(scheduler.request_frame());
        info!(
            "Animation mounted: {} flames, {} skeleton",
            simulation.population().flames().len(),
            simulation.population().skeleton().len()
        );
        Self {
            simulation,
            scheduler,
            pending,
            timer: FrameTimer::new(),
        }
    }

    /// Host callback for `request`.
    ///
    /// Draws one frame and schedules the next. A request that is not the
    /// pending one (stale or already cancelled) is ignored and returns `None`.
    pub fn on_frame<T: Surface + ?Sized>(
        &mut self,
        request: FrameRequest,
        clock: FrameClock,
        surface: &mut T,
    ) -> Option<FrameReport> {
        if self.pending != Some(request) {
            debug!("Ignoring stale frame request {:?}", request);
            return None;
        }
        self.pending = None;

        let scope = FrameScope::start();
        let report = self.simulation.frame(surface, clock);
        let elapsed = scope.finish(&mut self.timer);
        debug!(
            "Frame rendered in {:.2}ms (mean {:.2}ms)",
            elapsed,
            self.timer.mean_frame_time_ms()
        );

        self.pending = Some(self.scheduler.request_frame());
        Some(report)
    }

    /// Whether a frame callback is outstanding
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn simulation(&self) -> &BushSimulation {
        &self.simulation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Tear down: cancel the pending callback and release the field.
    pub fn unmount(mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            info!(
                "Animation unmounted after {} frames",
                self.simulation.frame_count()
            );
        }
    }
}

impl<S: FrameScheduler> Drop for Animation<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldTuning;
    use crate::core_types::Canvas;
    use crate::render::RecordingSurface;

    fn simulation() -> BushSimulation {
        let tuning = FieldTuning::default().with_counts(40, 8);
        BushSimulation::new(Canvas::default(), tuning, 3).unwrap()
    }

    #[test]
    fn test_mount_requests_one_frame() {
        let mut scheduler = ManualScheduler::new();
        let animation = Animation::mount(simulation(), &mut scheduler);
        assert!(animation.is_running());
        drop(animation);
        assert_eq!(scheduler.requested(), 1);
        assert_eq!(scheduler.cancelled(), 1);
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_each_frame_schedules_the_next() {
        let mut scheduler = ManualScheduler::new();
        let mut animation = Animation::mount(simulation(), &mut scheduler);
        let mut surface = RecordingSurface::new();
        let mut clock = FrameClock::default();

        for _ in 0..10 {
            let request = animation.scheduler_mut().take_pending().unwrap();
            clock = clock.advanced_by(16.7);
            assert!(animation.on_frame(request, clock, &mut surface).is_some());
        }
        assert_eq!(animation.simulation().frame_count(), 10);
        assert_eq!(animation.timer().frames(), 10);
        assert_eq!(animation.scheduler().requested(), 11);
        animation.unmount();
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_stale_request_is_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut animation = Animation::mount(simulation(), &mut scheduler);
        let mut surface = RecordingSurface::new();
        let stale = FrameRequest(999);
        assert!(animation
            .on_frame(stale, FrameClock::from_millis(16.0), &mut surface)
            .is_none());
        assert_eq!(surface.clears(), 0);
        assert!(animation.is_running());
    }
}
