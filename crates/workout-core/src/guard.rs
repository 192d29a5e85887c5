//! Identity gate for the single authorized user

use crate::error::{Result, WorkoutError};
use tracing::warn;
use workout_types::UserId;

/// The one identity allowed to read and write workouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedUser {
    id: UserId,
}

impl AuthorizedUser {
    pub fn new(id: i64) -> Self {
        Self { id: UserId(id) }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the authorized id if `claimed` names it exactly.
    ///
    /// A missing claim counts as a mismatch.
    pub fn check(&self, claimed: Option<i64>) -> Result<UserId> {
        match claimed {
            Some(id) if id == self.id.get() => Ok(self.id),
            _ => {
                match claimed {
                    Some(id) => warn!("Unauthorized access attempt by user ID: {}", id),
                    None => warn!("Unauthorized access attempt without a user ID"),
                }
                Err(WorkoutError::Unauthorized { claimed })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_match() {
        let guard = AuthorizedUser::new(6629263251);
        assert_eq!(guard.check(Some(6629263251)).unwrap(), UserId(6629263251));
    }

    #[test]
    fn test_rejects_other_and_missing_ids() {
        let guard = AuthorizedUser::new(6629263251);

        let err = guard.check(Some(1)).unwrap_err();
        assert!(matches!(err, WorkoutError::Unauthorized { claimed: Some(1) }));

        let err = guard.check(None).unwrap_err();
        assert!(err.is_unauthorized());
    }
}
