use super::types::WorkEntryStatus;

impl WorkEntryStatus {
    /// Check if transitioning from the current status to the new status
    /// is valid.
    ///
    /// Valid transitions:
    /// - `Pending` -> `Approved` | `Rejected`
    /// - `Rejected` -> `Pending` (resubmission)
    /// - `Approved` is a terminal state
    ///
    /// Repeating the current status is NOT a valid transition: approving
    /// an already-approved entry or rejecting an already-rejected one is
    /// a caller error and must fail.
    pub fn can_transition_to(&self, new_status: WorkEntryStatus) -> bool {
        match self {
            WorkEntryStatus::Pending => matches!(
                new_status,
                WorkEntryStatus::Approved | WorkEntryStatus::Rejected
            ),
            WorkEntryStatus::Rejected => matches!(new_status, WorkEntryStatus::Pending),
            WorkEntryStatus::Approved => false, // Terminal state
        }
    }

    /// Returns the list of valid statuses this status can transition to.
    pub fn valid_transitions(&self) -> Vec<WorkEntryStatus> {
        match self {
            WorkEntryStatus::Pending => {
                vec![WorkEntryStatus::Approved, WorkEntryStatus::Rejected]
            }
            WorkEntryStatus::Rejected => vec![WorkEntryStatus::Pending],
            WorkEntryStatus::Approved => vec![], // Terminal state
        }
    }

    /// Whether the status permits no further transitions.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
