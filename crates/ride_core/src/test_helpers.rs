//! Test helpers for common test setup and utilities.
//!
//! The fixtures follow the canonical scenario: rider Alice ("r1"), driver Bob
//! ("d1", "Toyota") registered with a fresh manager, and a ride to
//! [TEST_DESTINATION].

use crate::ecs::{DriverId, RideId, RiderId};
use crate::manager::RideManager;

pub const TEST_DESTINATION: &str = "123 Main St";

/// Manager with Alice spawned and Bob spawned and registered.
pub struct TestFixture {
    pub manager: RideManager,
    pub rider: RiderId,
    pub driver: DriverId,
}

/// Build the standard Alice/Bob fixture.
pub fn alice_and_bob() -> TestFixture {
    let mut manager = RideManager::new();
    let rider = manager.spawn_rider("Alice", "r1");
    let driver = manager.spawn_driver("Bob", "d1", "Toyota");
    manager
        .add_driver(driver)
        .expect("fixture driver belongs to the fixture manager");
    TestFixture {
        manager,
        rider,
        driver,
    }
}

impl TestFixture {
    /// Request a ride to [TEST_DESTINATION] as the fixture rider.
    ///
    /// # Panics
    ///
    /// Panics if the rider does not belong to the fixture manager (should never happen).
    pub fn request(&mut self) -> RideId {
        self.rider
            .request_ride(TEST_DESTINATION, &mut self.manager)
            .expect("fixture rider should request a ride")
    }

    /// Request a ride and have the fixture driver accept it.
    ///
    /// # Panics
    ///
    /// Panics if acceptance fails (should never happen on a fresh ride).
    pub fn accepted_ride(&mut self) -> RideId {
        let ride = self.request();
        self.driver
            .accept_ride(ride, &mut self.manager)
            .expect("fixture driver should accept a fresh ride");
        ride
    }

    /// Request, accept and complete a ride.
    ///
    /// # Panics
    ///
    /// Panics if any step fails (should never happen on a fresh ride).
    pub fn completed_ride(&mut self) -> RideId {
        let ride = self.accepted_ride();
        ride.mark_as_completed(&mut self.manager)
            .expect("fixture ride should complete");
        ride
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::RideStatus;

    #[test]
    fn fixture_registers_driver() {
        let fixture = alice_and_bob();
        assert_eq!(fixture.manager.drivers(), &[fixture.driver]);
        assert!(fixture.manager.rides().is_empty());
    }

    #[test]
    fn completed_ride_is_tracked() {
        let mut fixture = alice_and_bob();
        let ride = fixture.completed_ride();
        assert!(fixture.manager.contains_ride(ride));
        assert_eq!(ride.status(&fixture.manager), Ok(RideStatus::Completed));
    }
}
