#![allow(dead_code)]

use ride_core::ecs::{DriverId, RideId, RiderId};
use ride_core::manager::RideManager;

/// Spawn a driver and register it with the manager.
pub fn registered_driver(
    manager: &mut RideManager,
    name: &str,
    user_id: &str,
    vehicle_info: &str,
) -> DriverId {
    let driver = manager.spawn_driver(name, user_id, vehicle_info);
    manager
        .add_driver(driver)
        .expect("driver should register");
    driver
}

/// Drive a fresh ride through request, accept and complete.
pub fn complete_ride(
    manager: &mut RideManager,
    rider: RiderId,
    driver: DriverId,
    destination: &str,
) -> RideId {
    let ride = rider
        .request_ride(destination, manager)
        .expect("rider should request a ride");
    driver
        .accept_ride(ride, manager)
        .expect("driver should accept a fresh ride");
    ride.mark_as_completed(manager)
        .expect("ride should complete");
    ride
}
