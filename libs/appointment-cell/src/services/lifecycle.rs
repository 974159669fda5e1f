use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::ClinicStore;
use shared_models::{Appointment, AppointmentStatus};

use crate::models::AppointmentError;

/// Which status assignments `set_status` accepts.
///
/// `Permissive` allows any of the four statuses to be assigned and matches
/// the behavior this system replaces, where status was an unguarded field
/// (useful as an admin override). `Strict` enforces the forward-only
/// transition graph and keeps terminal states closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn allows(&self, from: AppointmentStatus, to: AppointmentStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            // Re-asserting the current status is a no-op, not a transition.
            TransitionPolicy::Strict if from == to => true,
            TransitionPolicy::Strict => self.valid_transitions(from).contains(&to),
        }
    }

    /// Legal next statuses under the strict graph. Terminal states return
    /// an empty set.
    pub fn valid_transitions(&self, from: AppointmentStatus) -> Vec<AppointmentStatus> {
        match from {
            AppointmentStatus::Scheduled => {
                vec![AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => {
                vec![AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }
}

/// Governs an appointment's path from creation to a terminal state.
pub struct LifecycleService {
    store: Arc<dyn ClinicStore>,
    policy: TransitionPolicy,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self::with_policy(store, TransitionPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn ClinicStore>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    async fn load(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.store
            .find_appointment_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    /// Assign a new status. Everything else on the record, including the
    /// creation timestamp, is left untouched.
    pub async fn set_status(
        &self,
        id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Setting appointment {} status to {}", id, new_status);

        let mut appointment = self.load(id).await?;
        if !self.policy.allows(appointment.status, new_status) {
            warn!(
                "Rejected status transition {} -> {} for appointment {}",
                appointment.status, new_status, id
            );
            return Err(AppointmentError::InvalidStatusTransition {
                from: appointment.status,
                to: new_status,
            });
        }

        appointment.status = new_status;
        let updated = self.store.save_appointment(&appointment).await?;
        info!("Appointment {} is now {}", updated.id, updated.status);
        Ok(updated)
    }

    /// Force the appointment to Cancelled, freeing its slot. Idempotent:
    /// cancelling an already-cancelled appointment succeeds silently.
    pub async fn cancel(&self, id: Uuid) -> Result<(), AppointmentError> {
        debug!("Cancelling appointment {}", id);

        let mut appointment = self.load(id).await?;
        if appointment.status == AppointmentStatus::Cancelled {
            return Ok(());
        }
        if !self.policy.allows(appointment.status, AppointmentStatus::Cancelled) {
            return Err(AppointmentError::InvalidStatusTransition {
                from: appointment.status,
                to: AppointmentStatus::Cancelled,
            });
        }

        appointment.status = AppointmentStatus::Cancelled;
        self.store.save_appointment(&appointment).await?;
        info!("Appointment {} cancelled", id);
        Ok(())
    }

    /// Remove the record permanently. Bypasses the status machine and is
    /// not reversible.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppointmentError> {
        debug!("Deleting appointment {}", id);

        if !self.store.delete_appointment_by_id(id).await? {
            return Err(AppointmentError::NotFound);
        }
        info!("Appointment {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn permissive_policy_allows_everything() {
        let policy = TransitionPolicy::Permissive;
        for from in [Scheduled, Confirmed, Completed, Cancelled] {
            for to in [Scheduled, Confirmed, Completed, Cancelled] {
                assert!(policy.allows(from, to));
            }
        }
    }

    #[test]
    fn strict_policy_follows_the_graph() {
        let policy = TransitionPolicy::Strict;
        assert!(policy.allows(Scheduled, Confirmed));
        assert!(policy.allows(Scheduled, Cancelled));
        assert!(policy.allows(Confirmed, Completed));
        assert!(policy.allows(Confirmed, Cancelled));

        assert!(!policy.allows(Scheduled, Completed));
        assert!(!policy.allows(Completed, Scheduled));
        assert!(!policy.allows(Cancelled, Scheduled));
        assert!(!policy.allows(Completed, Cancelled));
    }

    #[test]
    fn strict_policy_treats_self_assignment_as_noop() {
        let policy = TransitionPolicy::Strict;
        for status in [Scheduled, Confirmed, Completed, Cancelled] {
            assert!(policy.allows(status, status));
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        let policy = TransitionPolicy::Strict;
        assert!(policy.valid_transitions(Completed).is_empty());
        assert!(policy.valid_transitions(Cancelled).is_empty());
    }
}
