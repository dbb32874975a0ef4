//! Account service
//!
//! Registration, admin verification, password reset, period logging, and
//! the cascading delete. The single place where the registration contract
//! is applied.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fw_core::traits::Id;
use fw_models::{MenstruationPeriod, NewUser, RegistrationContract, Role, User};
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::store::RecordStore;

/// Account service
pub struct AccountService {
    store: Arc<dyn RecordStore>,
    contract: RegistrationContract,
}

impl AccountService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            contract: RegistrationContract::new(),
        }
    }

    /// Self-registration. The account starts unverified; an admin must
    /// activate it before it participates in notifications or assignment.
    pub async fn register(&self, input: NewUser) -> ServiceResult<User> {
        input
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        self.contract
            .validate(&input, Utc::now().date_naive())?;

        let user = self.store.create_user(input.into_user()).await?;
        tracing::info!(
            user_id = user.id,
            role = %user.role,
            "registered new account, awaiting verification"
        );
        Ok(user)
    }

    /// Verify an account: activates it and records the verification.
    /// Returns the refreshed signup-notification count for the admin badge.
    pub async fn verify_account(&self, user_id: Id) -> ServiceResult<usize> {
        let updated = self.store.activate_user(user_id).await?;
        if !updated {
            return Err(ServiceError::not_found(
                "Something went wrong, please refresh your browser and try again.",
            ));
        }

        Ok(self.store.unverified_feminine().await?.len())
    }

    /// Store a replacement password hash supplied by the identity layer.
    pub async fn reset_password(&self, user_id: Id, password_hash: &str) -> ServiceResult<()> {
        let updated = self.store.reset_password(user_id, password_hash).await?;
        if !updated {
            return Err(ServiceError::not_found(
                "User not found, please try again.",
            ));
        }
        Ok(())
    }

    /// Delete a user with the full cascade: period entries, assignment
    /// links in either direction, then the user row, atomically.
    pub async fn delete_user(&self, user_id: Id) -> ServiceResult<()> {
        let deleted = self.store.delete_user_cascade(user_id).await?;
        if !deleted {
            return Err(ServiceError::not_found(
                "Something went wrong, please try again.",
            ));
        }
        Ok(())
    }

    /// Log one cycle-start date for a Feminine user.
    pub async fn log_period(
        &self,
        user_id: Id,
        date: NaiveDate,
    ) -> ServiceResult<MenstruationPeriod> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found, please try again."))?;

        if user.role != Role::Feminine {
            return Err(ServiceError::validation(
                "Only feminine accounts can log period entries.",
            ));
        }

        self.store.create_period(user_id, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRecordStore;
    use crate::notifications::{NotificationService, Scope};

    fn registration(role: Role, email: &str) -> NewUser {
        NewUser {
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            middle_name: None,
            email: Some(email.to_string()),
            contact_no: None,
            address: None,
            birthdate: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
            role,
            menstruation_status: Some(true),
            remarks: None,
            password_hash: None,
        }
    }

    fn setup() -> (Arc<MemoryRecordStore>, AccountService) {
        let store = Arc::new(MemoryRecordStore::new());
        let service = AccountService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_register_starts_unverified() {
        let (_store, service) = setup();
        let user = service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap();
        assert!(!user.is_active);
        assert!(!user.is_verified);
        assert_eq!(user.menstruation_status, Some(true));
    }

    #[tokio::test]
    async fn test_register_rejects_admin_role() {
        let (_store, service) = setup();
        let err = service
            .register(registration(Role::Admin, "root@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (_store, service) = setup();
        service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap();

        let err = service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_requires_some_contact_detail() {
        let (_store, service) = setup();
        let mut input = registration(Role::Feminine, "maria@example.com");
        input.email = None;
        input.contact_no = None;

        let err = service.register(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_verify_account_sets_both_flags_and_reports_count() {
        let (store, service) = setup();
        let user = service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap();
        service
            .register(registration(Role::Feminine, "luz@example.com"))
            .await
            .unwrap();

        let remaining = service.verify_account(user.id.unwrap()).await.unwrap();
        assert_eq!(remaining, 1);

        let verified = store.find_user(user.id.unwrap()).await.unwrap().unwrap();
        assert!(verified.is_active);
        assert!(verified.is_verified);
    }

    #[tokio::test]
    async fn test_verify_missing_account_is_not_found() {
        let (_store, service) = setup();
        let err = service.verify_account(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let (store, service) = setup();
        let user = service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap();
        let id = user.id.unwrap();
        service.verify_account(id).await.unwrap();

        service
            .log_period(id, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .await
            .unwrap();
        store.insert_assignment(id, 77).await.unwrap();

        service.delete_user(id).await.unwrap();

        assert!(store.find_user(id).await.unwrap().is_none());
        assert_eq!(store.count_assignments_of_feminine(id).await.unwrap(), 0);

        let notifications = NotificationService::new(store.clone());
        assert_eq!(notifications.unseen_count(Scope::Global).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_log_period_rejected_for_health_worker() {
        let (_store, service) = setup();
        let worker = service
            .register(registration(Role::HealthWorker, "ana@example.com"))
            .await
            .unwrap();

        let err = service
            .log_period(
                worker.id.unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reset_password_round_trip() {
        let (store, service) = setup();
        let user = service
            .register(registration(Role::Feminine, "maria@example.com"))
            .await
            .unwrap();
        let id = user.id.unwrap();

        service.reset_password(id, "rehashed-secret").await.unwrap();
        let stored = store.find_user(id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash.as_deref(), Some("rehashed-secret"));

        let err = service.reset_password(404, "x").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
