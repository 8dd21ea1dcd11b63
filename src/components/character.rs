use glam::Vec2;
use hecs::Entity;

/// Health and energy pools.
///
/// Setters clamp into range and report whether the stored value actually
/// changed, which is what the `HealthChanged`/`EnergyChanged` events key off.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    max_health: i32,
    health: i32,
    max_energy: f32,
    energy: f32,
    /// Energy regained per second.
    pub energy_regen: f32,
}

impl Stats {
    /// Full pools.
    pub fn new(max_health: i32, max_energy: f32, energy_regen: f32) -> Self {
        let max_health = max_health.max(0);
        let max_energy = max_energy.max(0.0);
        Self {
            max_health,
            health: max_health,
            max_energy,
            energy: max_energy,
            energy_regen,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn set_health(&mut self, value: i32) -> bool {
        let value = value.clamp(0, self.max_health);
        if value == self.health {
            return false;
        }
        self.health = value;
        true
    }

    pub fn set_energy(&mut self, value: f32) -> bool {
        let value = value.clamp(0.0, self.max_energy);
        if value == self.energy {
            return false;
        }
        self.energy = value;
        true
    }

    pub fn regenerate(&mut self, dt: f32) -> bool {
        self.set_energy(self.energy + self.energy_regen * dt)
    }
}

/// A hit waiting to be applied by its receiver's next state-machine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damage {
    /// Entity that dealt the hit, when there is one.
    pub source: Option<Entity>,
    /// Where the hit came from; knockback points away from here.
    pub origin: Vec2,
    pub amount: i32,
}

impl Damage {
    pub fn new(source: Option<Entity>, origin: Vec2, amount: i32) -> Self {
        Self {
            source,
            origin,
            amount,
        }
    }

    /// Unit vector from the hit's origin toward `target`. Falls back to
    /// straight up when the two coincide.
    pub fn direction_to(&self, target: Vec2) -> Vec2 {
        let dir = (target - self.origin).normalize_or_zero();
        if dir == Vec2::ZERO {
            Vec2::Y
        } else {
            dir
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped_and_reports_changes() {
        let mut stats = Stats::new(3, 10.0, 1.0);
        assert!(!stats.set_health(5));
        assert_eq!(stats.health(), 3);
        assert!(stats.set_health(-4));
        assert_eq!(stats.health(), 0);
        assert!(stats.is_dead());
        assert!(!stats.set_health(0));
    }

    #[test]
    fn energy_regenerates_up_to_max() {
        let mut stats = Stats::new(3, 10.0, 2.0);
        stats.set_energy(4.0);
        assert!(stats.regenerate(1.0));
        assert_eq!(stats.energy(), 6.0);
        stats.regenerate(10.0);
        assert_eq!(stats.energy(), 10.0);
        assert!(!stats.regenerate(1.0));
    }

    #[test]
    fn knockback_direction_points_away_from_origin() {
        let hit = Damage::new(None, Vec2::new(-10.0, 0.0), 1);
        assert_eq!(hit.direction_to(Vec2::ZERO), Vec2::X);
        assert_eq!(hit.direction_to(Vec2::new(-10.0, 0.0)), Vec2::Y);
    }
}
