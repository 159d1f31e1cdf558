use skyfall_core::enums::PickupType;
use skyfall_core::tables::PickupEffect;
use skyfall_core::types::Rect;

use crate::nodes::aircraft::Aircraft;
use crate::nodes::entity::Body;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    kind: PickupType,
}

impl Pickup {
    pub fn new(kind: PickupType) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PickupType {
        self.kind
    }

    pub fn local_bounds(&self) -> Rect {
        self.kind.data().texture_rect.centered_bounds()
    }

    /// Grant this pickup's effect to the collecting aircraft.
    pub fn apply(&self, aircraft: &mut Aircraft, body: &mut Body) {
        match self.kind.data().effect {
            PickupEffect::Repair(points) => body.repair(points),
            PickupEffect::CollectMissiles(count) => aircraft.collect_missiles(count),
            PickupEffect::IncreaseSpread => aircraft.increase_spread(),
            PickupEffect::IncreaseFireRate => aircraft.increase_fire_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfall_core::enums::AircraftType;

    #[test]
    fn test_health_refill_repairs() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        let mut body = Body::new(60);
        Pickup::new(PickupType::HealthRefill).apply(&mut eagle, &mut body);
        assert_eq!(body.hitpoints(), 85);
    }

    #[test]
    fn test_missile_refill_adds_ammo() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        let mut body = Body::new(100);
        Pickup::new(PickupType::MissileRefill).apply(&mut eagle, &mut body);
        assert_eq!(eagle.missile_ammo(), 5);
    }

    #[test]
    fn test_spread_and_rate_upgrades() {
        let mut eagle = Aircraft::new(AircraftType::Eagle);
        let mut body = Body::new(100);
        Pickup::new(PickupType::FireSpread).apply(&mut eagle, &mut body);
        Pickup::new(PickupType::FireRate).apply(&mut eagle, &mut body);
        assert_eq!(eagle.spread_level(), 2);
        assert_eq!(eagle.fire_rate_level(), 2);
        assert_eq!(body.hitpoints(), 100, "upgrades leave hit points alone");
    }
}
