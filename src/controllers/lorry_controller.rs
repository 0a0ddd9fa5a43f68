//! Lorry collection
//!
//! Reads are open to any authenticated identity; writes are fleet
//! administration and require the admin flag.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::lorry_dto::{CreateLorryRequest, LorryResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::lorry_repository::LorryRepository;
use crate::utils::errors::AppError;

pub struct LorryController {
    lorries: LorryRepository,
}

fn require_admin(caller: &AuthenticatedUser) -> Result<(), AppError> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ))
    }
}

impl LorryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lorries: LorryRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<LorryResponse>, AppError> {
        let lorries = self.lorries.list_all().await?;
        Ok(lorries.iter().map(LorryResponse::from_model).collect())
    }

    pub async fn get(&self, id: i64) -> Result<LorryResponse, AppError> {
        let lorry = self
            .lorries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lorry {} not found", id)))?;

        Ok(LorryResponse::from_model(&lorry))
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: CreateLorryRequest,
    ) -> Result<LorryResponse, AppError> {
        require_admin(caller)?;
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let lorry = self.lorries.create(&request.name).await?;
        log::info!("🚚 Lorry {} ('{}') created", lorry.id, lorry.name);

        Ok(LorryResponse::from_model(&lorry))
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: i64) -> Result<(), AppError> {
        require_admin(caller)?;

        if !self.lorries.delete(id).await? {
            return Err(AppError::NotFound(format!("Lorry {} not found", id)));
        }
        log::info!("🗑️ Lorry {} deleted", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_admin_cannot_pass_admin_gate() {
        let caller = AuthenticatedUser {
            user_id: 1,
            username: "Lorry5Cavan".to_string(),
            is_admin: false,
        };
        assert!(matches!(
            require_admin(&caller),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn admin_passes_admin_gate() {
        let caller = AuthenticatedUser {
            user_id: 1,
            username: "dispatch".to_string(),
            is_admin: true,
        };
        assert!(require_admin(&caller).is_ok());
    }
}
