use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use bevy_ecs::prelude::{Component, Entity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RideStatus {
    Pending,
    Accepted,
    Completed,
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RideStatus::Pending => "pending",
            RideStatus::Accepted => "accepted",
            RideStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Identifies the [`crate::manager::RideManager`] a handle was issued by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManagerId(u64);

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(0);

impl ManagerId {
    pub(crate) fn next() -> Self {
        ManagerId(NEXT_MANAGER_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Handle to a rider entity living in a [`crate::manager::RideManager`] world.
/// Only resolves in the manager that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiderId(pub(crate) Entity, pub(crate) ManagerId);

/// Handle to a driver entity living in a [`crate::manager::RideManager`] world.
/// Only resolves in the manager that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverId(pub(crate) Entity, pub(crate) ManagerId);

/// Handle to a ride entity living in a [`crate::manager::RideManager`] world.
/// Only resolves in the manager that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RideId(pub(crate) Entity, pub(crate) ManagerId);

impl RiderId {
    pub fn entity(self) -> Entity {
        self.0
    }

    pub fn manager(self) -> ManagerId {
        self.1
    }
}

impl DriverId {
    pub fn entity(self) -> Entity {
        self.0
    }

    pub fn manager(self) -> ManagerId {
        self.1
    }
}

impl RideId {
    pub fn entity(self) -> Entity {
        self.0
    }

    pub fn manager(self) -> ManagerId {
        self.1
    }
}

/// Either side of a ride. Ratings point at participants through this, never by ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Participant {
    Rider(RiderId),
    Driver(DriverId),
}

impl Participant {
    pub fn entity(self) -> Entity {
        match self {
            Participant::Rider(id) => id.0,
            Participant::Driver(id) => id.0,
        }
    }
}

impl From<RiderId> for Participant {
    fn from(id: RiderId) -> Self {
        Participant::Rider(id)
    }
}

impl From<DriverId> for Participant {
    fn from(id: DriverId) -> Self {
        Participant::Driver(id)
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Rider(id) => write!(f, "rider#{}", id.0.index()),
            Participant::Driver(id) => write!(f, "driver#{}", id.0.index()),
        }
    }
}

/// Name and external identifier shared by riders and drivers.
/// `user_id` is not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Component, Serialize)]
pub struct Profile {
    pub name: String,
    pub user_id: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_id: user_id.into(),
        }
    }
}

/// Marker for rider entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Rider;

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub vehicle_info: String,
}

/// One participant scoring another. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    rating: i32,
    receiver: Participant,
    giver: Participant,
}

impl Rating {
    pub fn new(rating: i32, receiver: Participant, giver: Participant) -> Self {
        Self {
            rating,
            receiver,
            giver,
        }
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn receiver(&self) -> Participant {
        self.receiver
    }

    pub fn giver(&self) -> Participant {
        self.giver
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.rating, self.giver)
    }
}

/// Ratings received by a participant, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Component)]
pub struct Ratings(pub Vec<Rating>);

impl Ratings {
    pub fn push(&mut self, rating: Rating) {
        self.0.push(rating);
    }

    pub fn as_slice(&self) -> &[Rating] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean score, or `None` when nothing has been received yet.
    pub fn average(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let total: i64 = self.0.iter().map(|r| i64::from(r.rating)).sum();
        Some(total as f64 / self.0.len() as f64)
    }
}

/// A transport request. Compared by value: two rides with the same rider,
/// destination, status and driver are equal.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Ride {
    rider: RiderId,
    pub destination: String,
    pub status: RideStatus,
    /// Set once by `accept_ride`; never reassigned.
    driver: Option<DriverId>,
}

impl Ride {
    pub fn new(rider: RiderId, destination: impl Into<String>) -> Self {
        Self {
            rider,
            destination: destination.into(),
            status: RideStatus::Pending,
            driver: None,
        }
    }

    pub fn rider(&self) -> RiderId {
        self.rider
    }

    pub fn driver(&self) -> Option<DriverId> {
        self.driver
    }

    pub(crate) fn assign_driver(&mut self, driver: DriverId) {
        debug_assert!(self.driver.is_none(), "ride driver is set at most once");
        self.driver = Some(driver);
    }

    pub fn mark_as_accepted(&mut self) {
        self.status = RideStatus::Accepted;
    }

    /// No precondition: a pending ride without a driver can be completed directly.
    pub fn mark_as_completed(&mut self) {
        self.status = RideStatus::Completed;
    }
}
