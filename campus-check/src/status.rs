//! Availability status per scope.

/// Tri-state result of a uniqueness check for the value currently in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvailabilityStatus {
    /// Nothing confirmed for the current value.
    #[default]
    Unknown,
    /// A check for the current value is in flight.
    Pending,
    /// The backend answered for exactly the current value.
    Resolved { exists: bool },
}

impl AvailabilityStatus {
    pub fn flags(&self) -> StatusFlags {
        match *self {
            AvailabilityStatus::Unknown => StatusFlags::default(),
            AvailabilityStatus::Pending => StatusFlags {
                checking: true,
                exists: false,
                checked: false,
            },
            AvailabilityStatus::Resolved { exists } => StatusFlags {
                checking: false,
                exists,
                checked: true,
            },
        }
    }

    /// Submission must be disabled while checking or when the code is taken.
    pub fn blocks_submit(&self) -> bool {
        matches!(
            self,
            AvailabilityStatus::Pending | AvailabilityStatus::Resolved { exists: true }
        )
    }

    /// Only a resolved "does not exist" counts as a green light.
    pub fn is_confirmed_free(&self) -> bool {
        matches!(self, AvailabilityStatus::Resolved { exists: false })
    }
}

/// The status materialized as the three flags forms render from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusFlags {
    pub checking: bool,
    pub exists: bool,
    pub checked: bool,
}

impl StatusFlags {
    /// Validity hint shown under the field, if any.
    pub fn hint(&self) -> Option<&'static str> {
        if self.checking {
            Some("Checking availability…")
        } else if self.checked && self.exists {
            Some("Code already exists")
        } else if self.checked {
            Some("Code available")
        } else {
            None
        }
    }
}

impl From<AvailabilityStatus> for StatusFlags {
    fn from(status: AvailabilityStatus) -> Self {
        status.flags()
    }
}
