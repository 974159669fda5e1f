use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every consultation occupies a fixed 30-minute slot on the doctor's
/// schedule. Fixed-length slots keep conflict detection a plain half-open
/// range comparison.
pub const SLOT_MINUTES: i64 = 30;

/// End of the booking window starting at `start` (exclusive bound).
pub fn slot_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::minutes(SLOT_MINUTES)
}

/// Half-open overlap test for two booking windows: [s1, s1+30m) and
/// [s2, s2+30m) overlap iff s1 < s2+30m AND s2 < s1+30m. Windows that
/// merely touch (10:00 and 10:30) do not overlap.
pub fn windows_overlap(s1: DateTime<Utc>, s2: DateTime<Utc>) -> bool {
    s1 < slot_end(s2) && s2 < slot_end(s1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    /// Assigned once by the store on insert and never mutated afterwards.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.scheduled_at, slot_end(self.scheduled_at))
    }

    /// Whether this appointment still occupies its slot on the doctor's
    /// schedule. Cancelled appointments free the slot; everything else
    /// blocks it.
    pub fn blocks_schedule(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn overlaps_window(&self, start: DateTime<Utc>) -> bool {
        windows_overlap(self.scheduled_at, start)
    }
}

/// Appointment as handed to the store for insertion. The store assigns the
/// id and the creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal statuses: no further transition is expected in normal
    /// operation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}
