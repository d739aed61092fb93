//! Telemetry: ride counts by status and point-in-time snapshots of a manager.

use serde::Serialize;

use crate::ecs::{Participant, Rating, RideStatus};
use crate::manager::RideManager;

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RideCounts {
    pub rides_pending: usize,
    pub rides_accepted: usize,
    pub rides_completed: usize,
    pub drivers: usize,
}

impl RideCounts {
    pub fn add_ride(&mut self, status: RideStatus) {
        match status {
            RideStatus::Pending => self.rides_pending += 1,
            RideStatus::Accepted => self.rides_accepted += 1,
            RideStatus::Completed => self.rides_completed += 1,
        }
    }

    pub fn total_rides(&self) -> usize {
        self.rides_pending + self.rides_accepted + self.rides_completed
    }

    pub(crate) fn from_manager(manager: &RideManager) -> Self {
        let mut counts = RideCounts {
            drivers: manager.drivers().len(),
            ..Default::default()
        };
        for ride in manager.rides() {
            if let Ok(record) = manager.ride(*ride) {
                counts.add_ride(record.status);
            }
        }
        counts
    }
}

/// Participant reference as exported: entity bits plus kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum ParticipantRef {
    Rider(u64),
    Driver(u64),
}

impl From<Participant> for ParticipantRef {
    fn from(participant: Participant) -> Self {
        match participant {
            Participant::Rider(id) => ParticipantRef::Rider(id.entity().to_bits()),
            Participant::Driver(id) => ParticipantRef::Driver(id.entity().to_bits()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSnapshot {
    pub rating: i32,
    pub receiver: ParticipantRef,
    pub giver: ParticipantRef,
}

impl From<&Rating> for RatingSnapshot {
    fn from(rating: &Rating) -> Self {
        Self {
            rating: rating.rating(),
            receiver: rating.receiver().into(),
            giver: rating.giver().into(),
        }
    }
}

/// Snapshot of one registered driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSnapshot {
    pub entity: u64,
    pub name: String,
    pub user_id: String,
    pub vehicle_info: String,
    pub average_rating: Option<f64>,
    pub ratings: Vec<RatingSnapshot>,
}

/// Snapshot of one tracked ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RideSnapshot {
    pub entity: u64,
    pub rider: u64,
    pub rider_user_id: Option<String>,
    pub driver: Option<u64>,
    pub destination: String,
    pub status: RideStatus,
}

/// Snapshot of a manager's drivers and rides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSnapshot {
    pub counts: RideCounts,
    pub drivers: Vec<DriverSnapshot>,
    pub rides: Vec<RideSnapshot>,
}

/// Capture drivers and rides in registration order. Handles that no longer
/// resolve are skipped.
pub fn capture_snapshot(manager: &RideManager) -> ManagerSnapshot {
    let drivers = manager
        .drivers()
        .iter()
        .filter_map(|id| manager.driver(*id).ok())
        .map(|driver| DriverSnapshot {
            entity: driver.id.entity().to_bits(),
            name: driver.profile.name.clone(),
            user_id: driver.profile.user_id.clone(),
            vehicle_info: driver.vehicle_info.to_string(),
            average_rating: driver.ratings.average(),
            ratings: driver.ratings.as_slice().iter().map(Into::into).collect(),
        })
        .collect();

    let rides = manager
        .rides()
        .iter()
        .filter_map(|id| manager.ride(*id).ok().map(|ride| (*id, ride)))
        .map(|(id, ride)| RideSnapshot {
            entity: id.entity().to_bits(),
            rider: ride.rider().entity().to_bits(),
            rider_user_id: manager
                .profile(ride.rider().entity())
                .map(|p| p.user_id.clone()),
            driver: ride.driver().map(|d| d.entity().to_bits()),
            destination: ride.destination.clone(),
            status: ride.status,
        })
        .collect();

    ManagerSnapshot {
        counts: manager.counts(),
        drivers,
        rides,
    }
}
