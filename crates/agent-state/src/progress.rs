//! Service completion tally.

use crate::schema::{ProjectState, ServiceStatus};
use serde::Serialize;

/// Counts of services by status across the known categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceTally {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl ServiceTally {
    /// Tally every service in the known categories of `state`.
    pub fn from_state(state: &ProjectState) -> Self {
        let mut tally = Self::default();
        for (_, services) in state.services.categories() {
            for info in services.values() {
                tally.record(info.status());
            }
        }
        tally
    }

    /// Count one service.
    pub fn record(&mut self, status: ServiceStatus) {
        match status {
            ServiceStatus::Completed => self.completed += 1,
            ServiceStatus::InProgress => self.in_progress += 1,
            ServiceStatus::NotStarted => self.not_started += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.in_progress + self.not_started
    }

    /// Completed share in percent, or `None` when there are no services.
    pub fn completion_percent(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.completed as f64 / total as f64 * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_with_services(services: serde_json::Value) -> ProjectState {
        serde_json::from_value(json!({
            "project_metadata": {
                "current_phase": "Phase 1",
                "last_updated": "2026-10-01",
                "active_agent": "architect"
            },
            "services": services
        }))
        .unwrap()
    }

    #[test]
    fn test_sixty_percent() {
        let state = state_with_services(json!({
            "infrastructure_services": {
                "service_registry": {"status": "completed"},
                "event_bus": {"status": "completed"}
            },
            "core_business_services": {
                "billing": {"status": "completed"},
                "accounts": {"status": "in_progress"}
            },
            "data_services": {
                "warehouse": {"status": "not_started"}
            }
        }));

        let tally = ServiceTally::from_state(&state);
        assert_eq!(tally.completed, 3);
        assert_eq!(tally.in_progress, 1);
        assert_eq!(tally.not_started, 1);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.completion_percent(), Some(60.0));
    }

    #[test]
    fn test_zero_services_has_no_percentage() {
        let state = state_with_services(json!({}));
        let tally = ServiceTally::from_state(&state);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.completion_percent(), None);
    }

    #[test]
    fn test_unknown_categories_not_counted() {
        let state = state_with_services(json!({
            "ats_services": {"parser": {}},
            "legacy_services": {"old": {"status": "completed"}}
        }));
        let tally = ServiceTally::from_state(&state);
        assert_eq!(tally, ServiceTally { completed: 0, in_progress: 0, not_started: 1 });
    }
}
