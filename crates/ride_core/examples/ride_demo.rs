//! Walk one ride through its lifecycle and print the driver afterwards.
//!
//! Run with: cargo run -p ride_core --example ride_demo
//! Set RUST_LOG=ride_core=debug to see each transition.

use ride_core::error::RideError;
use ride_core::manager::RideManager;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RideError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut manager = RideManager::new();
    let alice = manager.spawn_rider("Alice", "r1");
    let bob = manager.spawn_driver("Bob", "d1", "Toyota");
    manager.add_driver(bob)?;

    let ride = alice.request_ride("123 Main St", &mut manager)?;
    bob.accept_ride(ride, &mut manager)?;
    ride.mark_as_completed(&mut manager)?;
    alice.rate_ride(ride, 5, &mut manager)?;

    println!("{}", manager.driver(bob)?);
    println!("{manager}");
    Ok(())
}
