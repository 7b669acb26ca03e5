//! Render loop driver.
//!
//! A two-state machine (`Stopped`/`Running`) that owns the surface, its
//! dimensions and the population, and schedules one "clear, advance, draw"
//! pass per frame through a cancellable [`FrameScheduler`] handle. Keeping
//! the platform behind the two traits below lets the stop/cancel guarantees
//! run under host tests without a display.

use crate::error::{Result, SnowfallError};
use crate::intensity::IntensityChange;
use crate::observer::SubscriptionId;
use crate::particle::Particle;
use crate::population::Population;
use crate::state::{Dimensions, LoopState};
use std::fmt;

/// Schedules one-shot frame callbacks, e.g. `requestAnimationFrame`.
pub trait FrameScheduler {
    type Handle: Copy + Eq + fmt::Debug;

    fn request_frame(&mut self) -> Result<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Drawing target owned exclusively by the loop.
pub trait Surface {
    /// `false` once the surface has been detached from its host.
    fn is_available(&self) -> bool;
    fn resize(&mut self, dims: Dimensions);
    fn clear(&mut self, dims: Dimensions) -> Result<()>;
    fn draw(&mut self, particle: &Particle) -> Result<()>;
}

pub struct RenderLoop<S: FrameScheduler, C: Surface> {
    scheduler: S,
    surface: C,
    dimensions: Dimensions,
    population: Population,
    state: LoopState,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler, C: Surface> RenderLoop<S, C> {
    pub fn new(
        scheduler: S,
        mut surface: C,
        dimensions: Dimensions,
        population: Population,
    ) -> Self {
        surface.resize(dimensions);
        Self {
            scheduler,
            surface,
            dimensions,
            population,
            state: LoopState::Stopped,
            pending: None,
        }
    }

    /// Stopped -> Running. Returns `false` if already running or if the first
    /// frame could not be scheduled.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                self.state = LoopState::Running;
                log::info!("[loop] started");
                true
            }
            Err(e) => {
                log::error!("[loop] start failed: {e}");
                false
            }
        }
    }

    /// Running -> Stopped. Cancels the pending frame so no further pass runs
    /// once this returns.
    pub fn stop(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }
        self.halt();
        log::info!("[loop] stopped");
        true
    }

    /// Entry point for a scheduled frame callback.
    ///
    /// Callbacks whose handle is not the pending one (cancelled or stale) are
    /// ignored before the surface is touched. Returns `true` when this frame
    /// halted the loop (surface lost, draw or scheduling failure) so the host
    /// can mirror the transition.
    pub fn on_frame(&mut self, handle: S::Handle) -> bool {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            log::debug!("[loop] ignoring stale frame {handle:?}");
            return false;
        }
        self.pending = None;

        if let Err(e) = self.render() {
            log::warn!("[loop] halting: {e}");
            self.halt();
            return true;
        }

        match self.scheduler.request_frame() {
            Ok(next) => {
                self.pending = Some(next);
                false
            }
            Err(e) => {
                log::error!("[loop] halting: {e}");
                self.halt();
                true
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        if !self.surface.is_available() {
            return Err(SnowfallError::SurfaceUnavailable);
        }
        let dims = self.dimensions;
        self.surface.clear(dims)?;
        let surface = &mut self.surface;
        self.population.try_tick(dims, |p| surface.draw(p))
    }

    fn halt(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }

    /// Takes effect on the next frame; never pauses or restarts the loop.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.dimensions = Dimensions::new(width, height);
        self.surface.resize(self.dimensions);
        log::debug!("[loop] resized to {width}x{height}");
    }

    /// Apply a new intensity against the current dimensions. Legal in any
    /// state, including before the first `start`.
    pub fn set_intensity(&mut self, density: u32, speed: u32) -> IntensityChange {
        self.population.apply_intensity(density, speed, self.dimensions)
    }

    /// Permanent teardown: stop and drop every observer.
    pub fn shutdown(&mut self) {
        self.stop();
        self.population.clear_observers();
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&IntensityChange) + 'static,
    ) -> SubscriptionId {
        self.population.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.population.unsubscribe(id)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler, C: Surface> Drop for RenderLoop<S, C> {
    // A frame still queued with the platform would call into freed state.
    fn drop(&mut self) {
        self.halt();
    }
}
