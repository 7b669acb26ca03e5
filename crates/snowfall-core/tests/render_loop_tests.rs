// Host-side tests for the render loop state machine.
// A scripted scheduler and a recording surface stand in for the browser.

use snowfall_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct SchedulerLog {
    next: u32,
    requested: Vec<u32>,
    cancelled: Vec<u32>,
    fail_requests: bool,
}

#[derive(Clone, Default)]
struct ManualScheduler(Rc<RefCell<SchedulerLog>>);

impl ManualScheduler {
    fn last_requested(&self) -> Option<u32> {
        self.0.borrow().requested.last().copied()
    }

    fn cancelled(&self) -> Vec<u32> {
        self.0.borrow().cancelled.clone()
    }

    fn fail_requests(&self, fail: bool) {
        self.0.borrow_mut().fail_requests = fail;
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Result<u32, SnowfallError> {
        let mut log = self.0.borrow_mut();
        if log.fail_requests {
            return Err(SnowfallError::Schedule("refused".into()));
        }
        log.next += 1;
        let handle = log.next;
        log.requested.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.0.borrow_mut().cancelled.push(handle);
    }
}

#[derive(Clone, Default)]
struct RecordingSurface {
    detached: Rc<Cell<bool>>,
    clears: Rc<Cell<usize>>,
    draws: Rc<Cell<usize>>,
    size: Rc<Cell<Dimensions>>,
}

impl Surface for RecordingSurface {
    fn is_available(&self) -> bool {
        !self.detached.get()
    }

    fn resize(&mut self, dims: Dimensions) {
        self.size.set(dims);
    }

    fn clear(&mut self, _dims: Dimensions) -> Result<(), SnowfallError> {
        self.clears.set(self.clears.get() + 1);
        Ok(())
    }

    fn draw(&mut self, _particle: &Particle) -> Result<(), SnowfallError> {
        self.draws.set(self.draws.get() + 1);
        Ok(())
    }
}

type TestLoop = RenderLoop<ManualScheduler, RecordingSurface>;

fn make_loop() -> (TestLoop, ManualScheduler, RecordingSurface) {
    let scheduler = ManualScheduler::default();
    let surface = RecordingSurface::default();
    let render_loop = RenderLoop::new(
        scheduler.clone(),
        surface.clone(),
        Dimensions::new(400, 300),
        Population::with_seed(17),
    );
    (render_loop, scheduler, surface)
}

/// Fire the most recently requested frame.
fn pump(render_loop: &mut TestLoop, scheduler: &ManualScheduler) -> bool {
    match scheduler.last_requested() {
        Some(handle) => render_loop.on_frame(handle),
        None => false,
    }
}

#[test]
fn starts_stopped_and_start_is_idempotent() {
    let (mut lp, scheduler, _) = make_loop();
    assert_eq!(lp.state(), LoopState::Stopped);
    assert!(lp.start());
    assert!(!lp.start());
    assert!(lp.is_running());
    assert_eq!(scheduler.0.borrow().requested.len(), 1);
}

#[test]
fn stop_when_stopped_is_noop() {
    let (mut lp, scheduler, _) = make_loop();
    assert!(!lp.stop());
    assert!(scheduler.cancelled().is_empty());
}

#[test]
fn each_frame_clears_draws_and_reschedules() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(20, 3);
    lp.start();
    for _ in 0..5 {
        pump(&mut lp, &scheduler);
    }
    assert_eq!(surface.clears.get(), 5);
    assert_eq!(surface.draws.get(), 5 * 30);
    assert_eq!(scheduler.0.borrow().requested.len(), 6);
    assert!(lp.is_running());
}

#[test]
fn stop_right_after_start_never_draws() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(100, 5);
    lp.start();
    let queued = scheduler.last_requested().unwrap();
    lp.stop();

    assert_eq!(scheduler.cancelled(), vec![queued]);
    // the callback was already in flight; it must not touch the surface
    lp.on_frame(queued);
    assert_eq!(surface.clears.get(), 0);
    assert_eq!(surface.draws.get(), 0);
    assert_eq!(scheduler.0.borrow().requested.len(), 1);
}

#[test]
fn stale_handle_after_restart_is_ignored() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(10, 1);
    lp.start();
    let old = scheduler.last_requested().unwrap();
    lp.stop();
    lp.start();
    let fresh = scheduler.last_requested().unwrap();
    assert_ne!(old, fresh);

    lp.on_frame(old);
    assert_eq!(surface.clears.get(), 0);

    lp.on_frame(fresh);
    assert_eq!(surface.clears.get(), 1);
}

#[test]
fn stop_cancels_the_specific_pending_frame() {
    let (mut lp, scheduler, _) = make_loop();
    lp.start();
    pump(&mut lp, &scheduler);
    pump(&mut lp, &scheduler);
    let pending = scheduler.last_requested().unwrap();
    lp.stop();
    assert_eq!(scheduler.cancelled(), vec![pending]);
}

#[test]
fn detached_surface_halts_without_drawing_or_rescheduling() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(50, 5);
    lp.start();
    pump(&mut lp, &scheduler);
    assert_eq!(surface.clears.get(), 1);

    surface.detached.set(true);
    let requested_before = scheduler.0.borrow().requested.len();
    assert!(pump(&mut lp, &scheduler));

    assert_eq!(lp.state(), LoopState::Stopped);
    assert_eq!(surface.clears.get(), 1);
    assert_eq!(surface.draws.get(), 75);
    assert_eq!(scheduler.0.borrow().requested.len(), requested_before);
}

#[test]
fn failed_schedule_leaves_loop_stopped() {
    let (mut lp, scheduler, _) = make_loop();
    scheduler.fail_requests(true);
    assert!(!lp.start());
    assert_eq!(lp.state(), LoopState::Stopped);

    scheduler.fail_requests(false);
    assert!(lp.start());
    scheduler.fail_requests(true);
    assert!(pump(&mut lp, &scheduler));
    assert_eq!(lp.state(), LoopState::Stopped);
}

#[test]
fn resize_applies_immediately_and_keeps_running() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(100, 10);
    lp.start();
    pump(&mut lp, &scheduler);

    lp.resize(50, 40);
    assert!(lp.is_running());
    assert_eq!(lp.dimensions(), Dimensions::new(50, 40));
    assert_eq!(surface.size.get(), Dimensions::new(50, 40));

    for _ in 0..20 {
        pump(&mut lp, &scheduler);
    }
    for p in lp.population().iter() {
        assert!(p.position().y <= 40.0);
        assert!(p.position().x >= 0.0 && p.position().x <= 50.0);
    }
}

#[test]
fn resize_to_zero_then_intensity_is_tolerated() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.resize(0, 0);
    let change = lp.set_intensity(50, 5);
    assert_eq!(change.count, 75);
    lp.start();
    pump(&mut lp, &scheduler);
    assert_eq!(surface.draws.get(), 75);
    assert!(lp.is_running());
}

#[test]
fn intensity_before_start_is_visible_to_first_frame() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(40, 2);
    lp.start();
    lp.set_intensity(60, 2);
    pump(&mut lp, &scheduler);
    assert_eq!(surface.draws.get(), 90);
}

#[test]
fn shutdown_stops_and_drops_observers() {
    let (mut lp, _, _) = make_loop();
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    lp.subscribe(move |_| h.set(h.get() + 1));
    lp.set_intensity(10, 1);
    lp.start();
    lp.shutdown();
    lp.set_intensity(20, 1);
    assert_eq!(hits.get(), 1);
    assert!(!lp.is_running());
}

#[test]
fn only_halting_frames_report_a_halt() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(10, 1);
    lp.start();
    let first = scheduler.last_requested().unwrap();
    assert!(!lp.on_frame(first));
    // stale handle: ignored, not a halt
    assert!(!lp.on_frame(first));

    surface.detached.set(true);
    assert!(pump(&mut lp, &scheduler));
    // already stopped; the same callback firing again reports nothing
    assert!(!pump(&mut lp, &scheduler));
}

#[test]
fn dropping_running_loop_cancels_pending_frame() {
    let (mut lp, scheduler, surface) = make_loop();
    lp.set_intensity(30, 2);
    lp.start();
    pump(&mut lp, &scheduler);
    let pending = scheduler.last_requested().unwrap();
    drop(lp);

    assert_eq!(scheduler.cancelled(), vec![pending]);
    assert_eq!(surface.clears.get(), 1);
}

#[test]
fn dropping_stopped_loop_cancels_nothing() {
    let (mut lp, scheduler, _) = make_loop();
    lp.start();
    lp.stop();
    assert_eq!(scheduler.cancelled().len(), 1);
    drop(lp);
    assert_eq!(scheduler.cancelled().len(), 1);

    let (lp, scheduler, _) = make_loop();
    drop(lp);
    assert!(scheduler.cancelled().is_empty());
}
