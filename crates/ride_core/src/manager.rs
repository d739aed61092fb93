//! Registry of drivers and active rides.
//!
//! The manager owns the ECS [World] that every rider, driver and ride lives in.
//! Participants and rides are addressed through copyable handles
//! ([RiderId], [DriverId], [RideId]) so rides and ratings never own the people
//! they refer to.

use std::fmt;

use bevy_ecs::prelude::{Entity, Mut, World};
use tracing::debug;

use crate::config::RatingConfig;
use crate::ecs::{
    Driver, DriverId, ManagerId, Participant, Profile, Rating, Ratings, Ride, RideId, RideStatus, Rider,
    RiderId,
};
use crate::error::{EntityKind, RideAction, RideError};
use crate::telemetry::{capture_snapshot, ManagerSnapshot, RideCounts};

/// Read-only view of a rider.
#[derive(Debug, Clone, Copy)]
pub struct RiderRef<'w> {
    pub id: RiderId,
    pub profile: &'w Profile,
    pub ratings: &'w Ratings,
}

/// Read-only view of a driver.
#[derive(Debug, Clone, Copy)]
pub struct DriverRef<'w> {
    pub id: DriverId,
    pub profile: &'w Profile,
    pub vehicle_info: &'w str,
    pub ratings: &'w Ratings,
}

impl fmt::Display for RiderRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rider {} ({})", self.profile.name, self.profile.user_id)?;
        write_ratings(f, self.ratings)
    }
}

impl fmt::Display for DriverRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Driver {} ({}), vehicle: {}",
            self.profile.name, self.profile.user_id, self.vehicle_info
        )?;
        write_ratings(f, self.ratings)
    }
}

fn write_ratings(f: &mut fmt::Formatter<'_>, ratings: &Ratings) -> fmt::Result {
    f.write_str(", ratings: [")?;
    for (i, rating) in ratings.as_slice().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{rating}")?;
    }
    f.write_str("]")
}

pub struct RideManager {
    id: ManagerId,
    world: World,
    drivers: Vec<DriverId>,
    rides: Vec<RideId>,
}

impl Default for RideManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RideManager {
    pub fn new() -> Self {
        Self::with_config(RatingConfig::default())
    }

    pub fn with_config(config: RatingConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        Self {
            id: ManagerId::next(),
            world,
            drivers: Vec::new(),
            rides: Vec::new(),
        }
    }

    /// Identifier stamped on every handle this manager issues.
    pub fn id(&self) -> ManagerId {
        self.id
    }

    pub fn config(&self) -> RatingConfig {
        *self.world.resource::<RatingConfig>()
    }

    pub fn set_config(&mut self, config: RatingConfig) {
        self.world.insert_resource(config);
    }

    /// Create a rider in this manager's world. Riders are not tracked in a list.
    pub fn spawn_rider(&mut self, name: impl Into<String>, user_id: impl Into<String>) -> RiderId {
        let entity = self
            .world
            .spawn((Profile::new(name, user_id), Rider, Ratings::default()))
            .id();
        RiderId(entity, self.id)
    }

    /// Create a driver in this manager's world. Use [RideManager::add_driver] to register it.
    pub fn spawn_driver(
        &mut self,
        name: impl Into<String>,
        user_id: impl Into<String>,
        vehicle_info: impl Into<String>,
    ) -> DriverId {
        let entity = self
            .world
            .spawn((
                Profile::new(name, user_id),
                Driver {
                    vehicle_info: vehicle_info.into(),
                },
                Ratings::default(),
            ))
            .id();
        DriverId(entity, self.id)
    }

    /// Register a driver spawned by this manager. Adding the same driver
    /// twice lists it twice.
    pub fn add_driver(&mut self, driver: DriverId) -> Result<(), RideError> {
        self.driver(driver)?;
        debug!(driver = ?driver.0, "driver added");
        self.drivers.push(driver);
        Ok(())
    }

    /// Track a ride and return its handle. Value-equal rides are stored separately.
    ///
    /// The ride's rider, and its driver if one is set, must belong to this manager.
    pub fn add_ride(&mut self, ride: Ride) -> Result<RideId, RideError> {
        self.rider(ride.rider())?;
        if let Some(driver) = ride.driver() {
            self.driver(driver)?;
        }
        let id = RideId(self.world.spawn(ride).id(), self.id);
        debug!(ride = ?id.0, "ride added");
        self.rides.push(id);
        Ok(id)
    }

    /// Remove every tracked ride equal to `ride`, which must be completed.
    ///
    /// Returns how many rides were removed. Removed rides are despawned and
    /// their handles stop resolving.
    pub fn delete_ride(&mut self, ride: RideId) -> Result<usize, RideError> {
        let target = self.ride(ride)?.clone();
        if target.status != RideStatus::Completed {
            return Err(RideError::RideNotCompleted {
                ride,
                action: RideAction::Delete,
            });
        }

        let world = &self.world;
        let mut removed = Vec::new();
        self.rides.retain(|id| {
            let equal = world.get::<Ride>(id.0).is_some_and(|r| *r == target);
            if equal {
                removed.push(*id);
            }
            !equal
        });
        for id in &removed {
            self.world.despawn(id.0);
        }
        debug!(ride = ?ride.0, removed = removed.len(), "completed ride deleted");
        Ok(removed.len())
    }

    pub fn drivers(&self) -> &[DriverId] {
        &self.drivers
    }

    pub fn rides(&self) -> &[RideId] {
        &self.rides
    }

    pub fn contains_ride(&self, ride: RideId) -> bool {
        self.rides.contains(&ride)
    }

    pub fn ride(&self, ride: RideId) -> Result<&Ride, RideError> {
        let entity = self.local(EntityKind::Ride, ride.0, ride.1)?;
        self.world
            .get::<Ride>(entity)
            .ok_or_else(|| RideError::not_found(EntityKind::Ride, entity))
    }

    pub fn rider(&self, rider: RiderId) -> Result<RiderRef<'_>, RideError> {
        let entity = self.local(EntityKind::Rider, rider.0, rider.1)?;
        let missing = || RideError::not_found(EntityKind::Rider, entity);
        self.world.get::<Rider>(entity).ok_or_else(missing)?;
        Ok(RiderRef {
            id: rider,
            profile: self.world.get::<Profile>(entity).ok_or_else(missing)?,
            ratings: self.world.get::<Ratings>(entity).ok_or_else(missing)?,
        })
    }

    pub fn driver(&self, driver: DriverId) -> Result<DriverRef<'_>, RideError> {
        let entity = self.local(EntityKind::Driver, driver.0, driver.1)?;
        let missing = || RideError::not_found(EntityKind::Driver, entity);
        let vehicle = self.world.get::<Driver>(entity).ok_or_else(missing)?;
        Ok(DriverRef {
            id: driver,
            profile: self.world.get::<Profile>(entity).ok_or_else(missing)?,
            vehicle_info: &vehicle.vehicle_info,
            ratings: self.world.get::<Ratings>(entity).ok_or_else(missing)?,
        })
    }

    /// First registered driver carrying `user_id`.
    pub fn find_driver_by_user_id(&self, user_id: &str) -> Option<DriverId> {
        self.drivers.iter().copied().find(|id| {
            self.world
                .get::<Profile>(id.0)
                .is_some_and(|p| p.user_id == user_id)
        })
    }

    /// Ratings received by either kind of participant.
    pub fn ratings(&self, participant: Participant) -> Result<&[Rating], RideError> {
        match participant {
            Participant::Rider(id) => self.rider(id).map(|r| r.ratings.as_slice()),
            Participant::Driver(id) => self.driver(id).map(|d| d.ratings.as_slice()),
        }
    }

    pub fn counts(&self) -> RideCounts {
        RideCounts::from_manager(self)
    }

    pub fn snapshot(&self) -> ManagerSnapshot {
        capture_snapshot(self)
    }

    pub(crate) fn ride_mut(&mut self, ride: RideId) -> Result<Mut<'_, Ride>, RideError> {
        let entity = self.local(EntityKind::Ride, ride.0, ride.1)?;
        self.world
            .get_mut::<Ride>(entity)
            .ok_or_else(|| RideError::not_found(EntityKind::Ride, entity))
    }

    pub(crate) fn ratings_mut(
        &mut self,
        participant: Participant,
    ) -> Result<Mut<'_, Ratings>, RideError> {
        let (kind, entity, present) = match participant {
            Participant::Rider(id) => {
                let entity = self.local(EntityKind::Rider, id.0, id.1)?;
                (
                    EntityKind::Rider,
                    entity,
                    self.world.get::<Rider>(entity).is_some(),
                )
            }
            Participant::Driver(id) => {
                let entity = self.local(EntityKind::Driver, id.0, id.1)?;
                (
                    EntityKind::Driver,
                    entity,
                    self.world.get::<Driver>(entity).is_some(),
                )
            }
        };
        if !present {
            return Err(RideError::not_found(kind, entity));
        }
        self.world
            .get_mut::<Ratings>(entity)
            .ok_or_else(|| RideError::not_found(kind, entity))
    }

    /// Handles issued by another manager never resolve here, even when the
    /// entity index collides with one of ours.
    fn local(
        &self,
        kind: EntityKind,
        entity: Entity,
        manager: ManagerId,
    ) -> Result<Entity, RideError> {
        if manager == self.id {
            Ok(entity)
        } else {
            Err(RideError::not_found(kind, entity))
        }
    }

    pub(crate) fn profile(&self, entity: Entity) -> Option<&Profile> {
        self.world.get::<Profile>(entity)
    }
}

impl fmt::Debug for RideManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RideManager")
            .field("id", &self.id)
            .field("drivers", &self.drivers)
            .field("rides", &self.rides)
            .field("config", &self.config())
            .finish()
    }
}

impl fmt::Display for RideManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("drivers: [")?;
        for (i, id) in self.drivers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.driver(*id) {
                Ok(driver) => write!(
                    f,
                    "{} ({}, {})",
                    driver.profile.name, driver.profile.user_id, driver.vehicle_info
                )?,
                Err(_) => write!(f, "{:?}", id.0)?,
            }
        }
        f.write_str("]\nrides: [")?;
        for (i, id) in self.rides.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.ride(*id) {
                Ok(ride) => write!(f, "{} ({})", ride.destination, ride.status)?,
                Err(_) => write!(f, "{:?}", id.0)?,
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_driver_keeps_duplicates() {
        let mut manager = RideManager::new();
        let bob = manager.spawn_driver("Bob", "d1", "Toyota");
        manager.add_driver(bob).expect("add driver");
        manager.add_driver(bob).expect("add driver");
        assert_eq!(manager.drivers(), &[bob, bob]);
    }

    #[test]
    fn spawned_driver_is_not_registered() {
        let mut manager = RideManager::new();
        let bob = manager.spawn_driver("Bob", "d1", "Toyota");
        assert!(manager.drivers().is_empty());
        assert_eq!(manager.find_driver_by_user_id("d1"), None);
        manager.add_driver(bob).expect("add driver");
        assert_eq!(manager.find_driver_by_user_id("d1"), Some(bob));
    }

    #[test]
    fn add_ride_tracks_new_entity_each_time() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let first = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        let second = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        assert_ne!(first, second);
        assert_eq!(manager.rides(), &[first, second]);
    }

    #[test]
    fn delete_pending_ride_leaves_rides_untouched() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let ride = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        let err = manager.delete_ride(ride).expect_err("pending ride");
        assert_eq!(
            err,
            RideError::RideNotCompleted {
                ride,
                action: RideAction::Delete
            }
        );
        assert_eq!(manager.rides(), &[ride]);
    }

    #[test]
    fn delete_removes_all_value_equal_rides() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let first = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        let second = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        let other = manager.add_ride(Ride::new(alice, "Station")).expect("add ride");
        for id in [first, second, other] {
            manager.ride_mut(id).expect("ride").mark_as_completed();
        }

        let removed = manager.delete_ride(first).expect("delete");

        assert_eq!(removed, 2);
        assert_eq!(manager.rides(), &[other]);
        assert!(manager.ride(second).is_err());
    }

    #[test]
    fn delete_compares_riders_by_handle() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let twin = manager.spawn_rider("Alice", "r1");
        let first = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        let second = manager.add_ride(Ride::new(twin, "Airport")).expect("add ride");
        for id in [first, second] {
            manager.ride_mut(id).expect("ride").mark_as_completed();
        }

        assert_eq!(manager.delete_ride(first), Ok(1));
        assert_eq!(manager.rides(), &[second]);
    }

    #[test]
    fn lookups_report_wrong_kind_as_not_found() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let as_driver = DriverId(alice.0, alice.1);
        assert_eq!(
            manager.driver(as_driver).unwrap_err(),
            RideError::NotFound {
                kind: EntityKind::Driver,
                entity: alice.0
            }
        );
        assert!(manager.ratings_mut(Participant::Driver(as_driver)).is_err());
        assert!(manager.ratings_mut(Participant::Rider(alice)).is_ok());
    }

    #[test]
    fn foreign_handles_with_colliding_index_are_not_found() {
        let mut other = RideManager::new();
        let carol = other.spawn_rider("Carol", "r9");
        let ghost = other.spawn_driver("Ghost", "d9", "Van");
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let bob = manager.spawn_driver("Bob", "d1", "Toyota");
        assert_eq!(carol.entity(), alice.entity());
        assert_eq!(ghost.entity(), bob.entity());

        assert_eq!(
            manager.rider(carol).unwrap_err(),
            RideError::NotFound {
                kind: EntityKind::Rider,
                entity: carol.entity()
            }
        );
        assert!(manager.driver(ghost).is_err());
        assert!(manager.ratings_mut(Participant::Rider(carol)).is_err());
        assert!(manager.add_driver(ghost).is_err());
        assert!(manager.drivers().is_empty());
    }

    #[test]
    fn add_ride_rejects_rider_from_other_manager() {
        let mut other = RideManager::new();
        let carol = other.spawn_rider("Carol", "r9");
        let mut manager = RideManager::new();
        manager.spawn_rider("Alice", "r1");

        assert!(matches!(
            manager.add_ride(Ride::new(carol, "Airport")),
            Err(RideError::NotFound {
                kind: EntityKind::Rider,
                ..
            })
        ));
        assert!(manager.rides().is_empty());
    }

    #[test]
    fn foreign_ride_handle_is_not_found() {
        let mut other = RideManager::new();
        let carol = other.spawn_rider("Carol", "r9");
        let foreign = other.add_ride(Ride::new(carol, "Airport")).expect("add ride");
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let local = manager.add_ride(Ride::new(alice, "Airport")).expect("add ride");
        assert_eq!(foreign.entity(), local.entity());

        assert!(manager.ride(foreign).is_err());
        assert!(manager.ride_mut(foreign).is_err());
        assert!(!manager.contains_ride(foreign));
    }

    #[test]
    fn display_lists_drivers_and_rides() {
        let mut manager = RideManager::new();
        let alice = manager.spawn_rider("Alice", "r1");
        let bob = manager.spawn_driver("Bob", "d1", "Toyota");
        manager.add_driver(bob).expect("add driver");
        manager.add_ride(Ride::new(alice, "123 Main St")).expect("add ride");
        assert_eq!(
            manager.to_string(),
            "drivers: [Bob (d1, Toyota)]\nrides: [123 Main St (pending)]"
        );
    }

    #[test]
    fn config_is_stored_in_world() {
        let mut manager = RideManager::with_config(RatingConfig::five_star());
        assert_eq!(manager.config().score_bounds, Some((1, 5)));
        manager.set_config(RatingConfig::default());
        assert_eq!(manager.config().score_bounds, None);
    }
}
