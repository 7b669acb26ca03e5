//! Population controller: owns the live set of particles and maps an
//! [`Intensity`] onto its size and speed distribution.

use crate::intensity::{Intensity, IntensityChange};
use crate::observer::{Observers, SubscriptionId};
use crate::particle::Particle;
use crate::state::Dimensions;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::convert::Infallible;

pub struct Population {
    particles: Vec<Particle>,
    rng: StdRng,
    observers: Observers<IntensityChange>,
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}

impl Population {
    /// Empty population seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Empty population with a deterministic random stream.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
            observers: Observers::new(),
        }
    }

    /// Resize the population to match `density` and re-randomize every
    /// particle's fall speed against `speed`, then notify observers.
    ///
    /// Speeds are redrawn even when only density changed; per-particle speed
    /// is derived from the global setting, not kept as identity.
    pub fn apply_intensity(
        &mut self,
        density: u32,
        speed: u32,
        dims: Dimensions,
    ) -> IntensityChange {
        let requested = Intensity::new(density, speed);
        let intensity = requested.clamped();
        if intensity != requested {
            log::warn!(
                "[population] intensity {:?} out of range, clamped to {:?}",
                requested,
                intensity
            );
        }

        let target = intensity.target_count();
        while self.particles.len() < target {
            self.particles.push(Particle::spawn(&mut self.rng, dims));
        }
        // order carries no meaning, so dropping from the end is as good as any
        self.particles.truncate(target);

        let speed = intensity.speed as f64;
        for particle in &mut self.particles {
            particle.rescale_speed(&mut self.rng, speed);
        }

        let change = IntensityChange {
            density: intensity.density,
            speed: intensity.speed,
            count: self.particles.len(),
        };
        log::debug!(
            "[population] density={} speed={} count={}",
            change.density,
            change.speed,
            change.count
        );
        self.observers.notify(&change);
        change
    }

    /// Advance then draw every particle in population order; later particles
    /// draw on top of earlier ones.
    pub fn tick(&mut self, dims: Dimensions, mut draw: impl FnMut(&Particle)) {
        let result: Result<(), Infallible> = self.try_tick(dims, |p| {
            draw(p);
            Ok(())
        });
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`tick`](Self::tick), but the first draw error aborts the pass.
    pub fn try_tick<E>(
        &mut self,
        dims: Dimensions,
        mut draw: impl FnMut(&Particle) -> Result<(), E>,
    ) -> Result<(), E> {
        for particle in &mut self.particles {
            particle.advance(&mut self.rng, dims);
            draw(particle)?;
        }
        Ok(())
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&IntensityChange) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_then_shrinks_from_the_end() {
        let dims = Dimensions::new(320, 240);
        let mut population = Population::with_seed(5);
        population.apply_intensity(40, 5, dims);
        assert_eq!(population.len(), 60);
        let head: Vec<_> = population.iter().take(30).map(|p| p.radius()).collect();

        population.apply_intensity(20, 5, dims);
        assert_eq!(population.len(), 30);
        let after: Vec<_> = population.iter().map(|p| p.radius()).collect();
        assert_eq!(head, after);
    }

    #[test]
    fn out_of_range_input_is_clamped_not_rejected() {
        let mut population = Population::with_seed(5);
        let change = population.apply_intensity(400, 0, Dimensions::new(10, 10));
        assert_eq!(
            change,
            IntensityChange {
                density: 100,
                speed: 1,
                count: 150
            }
        );
    }
}
