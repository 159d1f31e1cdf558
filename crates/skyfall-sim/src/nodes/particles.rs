//! Particle trails: emitters attached to missiles feed per-type particle systems.

use std::collections::VecDeque;

use glam::Vec2;

use skyfall_core::category::Category;
use skyfall_core::constants::EMISSION_RATE;
use skyfall_core::enums::ParticleType;
use skyfall_core::state::ParticleQuad;
use skyfall_core::types::Color;

use crate::command::{Action, Command, CommandQueue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub color: Color,
    /// Seconds left before the particle expires.
    pub lifetime: f32,
}

/// Holds every live particle of one type, oldest first.
#[derive(Debug, Clone)]
pub struct ParticleNode {
    kind: ParticleType,
    particles: VecDeque<Particle>,
}

impl ParticleNode {
    pub fn new(kind: ParticleType) -> Self {
        Self {
            kind,
            particles: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> ParticleType {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn add_particle(&mut self, position: Vec2) {
        let data = self.kind.data();
        self.particles.push_back(Particle {
            position,
            color: data.color,
            lifetime: data.lifetime,
        });
    }

    pub fn update(&mut self, dt: f32) {
        while self.particles.front().is_some_and(|p| p.lifetime <= 0.0) {
            self.particles.pop_front();
        }
        for particle in &mut self.particles {
            particle.lifetime -= dt;
        }
    }

    /// Quads with alpha faded by remaining lifetime.
    pub fn quads(&self) -> Vec<ParticleQuad> {
        let total = self.kind.data().lifetime;
        self.particles
            .iter()
            .map(|particle| {
                let ratio = (particle.lifetime / total).max(0.0);
                let mut color = particle.color;
                color.a = (255.0 * ratio) as u8;
                ParticleQuad {
                    position: particle.position,
                    color,
                }
            })
            .collect()
    }
}

/// Emits particles at its world position at a fixed rate.
#[derive(Debug, Clone)]
pub struct EmitterNode {
    kind: ParticleType,
    accumulated_time: f32,
}

impl EmitterNode {
    pub fn new(kind: ParticleType) -> Self {
        Self {
            kind,
            accumulated_time: 0.0,
        }
    }

    pub fn kind(&self) -> ParticleType {
        self.kind
    }

    pub(crate) fn update(&mut self, world_position: Vec2, dt: f32, commands: &mut CommandQueue) {
        let interval = 1.0 / EMISSION_RATE;
        self.accumulated_time += dt;

        let mut count = 0;
        while self.accumulated_time > interval {
            self.accumulated_time -= interval;
            count += 1;
        }
        if count > 0 {
            commands.push(Command::new(
                Category::PARTICLE_SYSTEM,
                Action::EmitParticles {
                    kind: self.kind,
                    position: world_position,
                    count,
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_expire_in_order() {
        let mut flame = ParticleNode::new(ParticleType::Propellant);
        flame.add_particle(Vec2::ZERO);
        flame.update(0.3);
        flame.add_particle(Vec2::ONE);
        flame.update(0.35);
        assert_eq!(flame.len(), 2, "expired particles are dropped on the next update");
        flame.update(0.1);
        assert_eq!(flame.len(), 1);
        assert_eq!(flame.quads()[0].position, Vec2::ONE);
    }

    #[test]
    fn test_alpha_fades_with_lifetime() {
        let mut smoke = ParticleNode::new(ParticleType::Smoke);
        smoke.add_particle(Vec2::ZERO);
        assert_eq!(smoke.quads()[0].color.a, 255);
        smoke.update(2.0);
        let alpha = smoke.quads()[0].color.a;
        assert!((126..=128).contains(&alpha), "half-life alpha was {alpha}");
    }

    #[test]
    fn test_alpha_never_negative() {
        let mut flame = ParticleNode::new(ParticleType::Propellant);
        flame.add_particle(Vec2::ZERO);
        flame.update(5.0);
        assert_eq!(flame.quads()[0].color.a, 0);
    }

    #[test]
    fn test_emitter_rate() {
        let mut emitter = EmitterNode::new(ParticleType::Smoke);
        let mut queue = CommandQueue::new();
        emitter.update(Vec2::new(3.0, 4.0), 0.09, &mut queue);
        let command = queue.pop().expect("emitter should request particles");
        assert_eq!(command.category, Category::PARTICLE_SYSTEM);
        match command.action {
            Action::EmitParticles { kind, position, count } => {
                assert_eq!(kind, ParticleType::Smoke);
                assert_eq!(position, Vec2::new(3.0, 4.0));
                assert_eq!(count, 2, "0.09 s at 30 per second");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_emitter_idle_below_interval() {
        let mut emitter = EmitterNode::new(ParticleType::Propellant);
        let mut queue = CommandQueue::new();
        emitter.update(Vec2::ZERO, 0.01, &mut queue);
        assert!(queue.is_empty());
    }
}
