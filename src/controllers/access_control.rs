//! Access control
//!
//! Decides, per caller and per lorry, whether a mutation is allowed. The
//! auto-claim of an unclaimed lorry is an explicit operation here, not a
//! side effect hidden in a read path. Callers resolve the lorry first, so a
//! missing resource is always a 404 before this layer can answer 403.

use sqlx::PgPool;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::lorry::Lorry;
use crate::repositories::lorry_repository::LorryRepository;
use crate::utils::errors::AppError;

pub struct AccessControl {
    lorries: LorryRepository,
}

/// A lorry with no owner is claimable by the identity whose username matches
/// its name. Pure check, no storage involved.
pub fn is_claim_eligible(caller: &AuthenticatedUser, lorry: &Lorry) -> bool {
    lorry.owner_id.is_none() && caller.username == lorry.name
}

impl AccessControl {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lorries: LorryRepository::new(pool),
        }
    }

    /// One-time link of an unclaimed lorry to the caller. The underlying
    /// update is conditional on `owner_id IS NULL`, so concurrent first-use
    /// calls cannot both win; the loser sees `false` and falls through to the
    /// ordinary ownership check.
    pub async fn claim_if_eligible(
        &self,
        caller: &AuthenticatedUser,
        lorry: &Lorry,
    ) -> Result<bool, AppError> {
        if !is_claim_eligible(caller, lorry) {
            return Ok(false);
        }

        let claimed = self.lorries.claim(lorry.id, caller.user_id).await?;
        if claimed {
            log::info!(
                "🔗 Lorry {} ('{}') claimed by user {}",
                lorry.id,
                lorry.name,
                caller.username
            );
        }
        Ok(claimed)
    }

    /// Gate for every mutating operation: admins pass, otherwise the caller
    /// must own the lorry (claiming it now if eligible). No partial mutation
    /// has happened by the time this can fail.
    pub async fn authorize(
        &self,
        caller: &AuthenticatedUser,
        lorry: &Lorry,
    ) -> Result<(), AppError> {
        if caller.is_admin {
            return Ok(());
        }

        if self.claim_if_eligible(caller, lorry).await? {
            return Ok(());
        }

        if lorry.owner_id == Some(caller.user_id) {
            return Ok(());
        }

        Err(AppError::Forbidden(
            "You do not have access to this lorry".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id,
            username: username.to_string(),
            is_admin: false,
        }
    }

    fn lorry(id: i64, name: &str, owner_id: Option<i64>) -> Lorry {
        Lorry {
            id,
            name: name.to_string(),
            owner_id,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn unclaimed_lorry_with_matching_name_is_eligible() {
        let caller = user(7, "Lorry5Cavan");
        assert!(is_claim_eligible(&caller, &lorry(5, "Lorry5Cavan", None)));
    }

    #[test]
    fn claimed_lorry_is_never_eligible() {
        let caller = user(7, "Lorry5Cavan");
        assert!(!is_claim_eligible(&caller, &lorry(5, "Lorry5Cavan", Some(3))));
        // Not even for its current owner.
        assert!(!is_claim_eligible(&caller, &lorry(5, "Lorry5Cavan", Some(7))));
    }

    #[test]
    fn name_mismatch_is_not_eligible() {
        let caller = user(7, "SomeoneElse");
        assert!(!is_claim_eligible(&caller, &lorry(5, "Lorry5Cavan", None)));
    }
}
