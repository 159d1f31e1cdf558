//! Enemy spawn schedule, released as the view scrolls up the world.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use skyfall_core::enums::AircraftType;

/// One scheduled enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: AircraftType,
    /// Horizontal offset from the player's spawn position.
    pub x: f32,
    /// Distance above the player's spawn position.
    pub depth: f32,
}

impl SpawnPoint {
    pub const fn new(kind: AircraftType, x: f32, depth: f32) -> Self {
        Self { kind, x, depth }
    }
}

/// Pending spawns, nearest first.
#[derive(Debug, Clone, Default)]
pub struct SpawnSchedule {
    pending: VecDeque<SpawnPoint>,
}

impl SpawnSchedule {
    pub fn new(points: impl IntoIterator<Item = SpawnPoint>) -> Self {
        let mut points: Vec<_> = points.into_iter().collect();
        points.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self {
            pending: points.into(),
        }
    }

    /// Four Raptors followed by two Avenger pairs.
    pub fn default_mission() -> Vec<SpawnPoint> {
        use AircraftType::{Avenger, Raptor};
        vec![
            SpawnPoint::new(Raptor, 0.0, 500.0),
            SpawnPoint::new(Raptor, 0.0, 1000.0),
            SpawnPoint::new(Raptor, 100.0, 1100.0),
            SpawnPoint::new(Raptor, -100.0, 1100.0),
            SpawnPoint::new(Avenger, -70.0, 1400.0),
            SpawnPoint::new(Avenger, -70.0, 1600.0),
            SpawnPoint::new(Avenger, 70.0, 1400.0),
            SpawnPoint::new(Avenger, 70.0, 1600.0),
        ]
    }

    /// Pop every spawn strictly closer than `reach`, nearest first.
    pub fn release_due(&mut self, reach: f32) -> Vec<SpawnPoint> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|point| point.depth < reach) {
            if let Some(point) = self.pending.pop_front() {
                due.push(point);
            }
        }
        due
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_sorted_by_depth() {
        let mut schedule = SpawnSchedule::new(SpawnSchedule::default_mission());
        let all = schedule.release_due(f32::INFINITY);
        assert_eq!(all.len(), 8);
        assert!(all.windows(2).all(|w| w[0].depth <= w[1].depth));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_release_strictly_inside_reach() {
        let mut schedule = SpawnSchedule::new([SpawnPoint::new(AircraftType::Raptor, 0.0, 500.0)]);
        assert!(schedule.release_due(400.0).is_empty(), "spawn beyond reach stays pending");
        assert!(schedule.release_due(500.0).is_empty(), "comparison is strict");
        assert_eq!(schedule.release_due(600.0).len(), 1);
        assert_eq!(schedule.remaining(), 0);
    }

    #[test]
    fn test_equal_depths_keep_listed_order() {
        let mut schedule = SpawnSchedule::new(SpawnSchedule::default_mission());
        let due = schedule.release_due(1150.0);
        assert_eq!(due.len(), 4);
        assert_eq!(due[2].x, 100.0);
        assert_eq!(due[3].x, -100.0);
    }
}
