use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::categories::{BillingMode, CategoryRepositoryTrait, PermitCategory};
use crate::errors::{Result, ValidationError};
use crate::fees::{calculate_permit_fee, resolve_validity};

use super::permits_model::{NewPermit, Permit, PermitDB, PermitUpdate};
use super::permits_traits::{PermitRepositoryTrait, PermitServiceTrait};

/// Service orchestrating the permit lifecycle: validate, resolve the
/// validity period, compute the fee, persist. Derived fields only ever
/// change through this pipeline.
pub struct PermitService {
    permit_repository: Arc<dyn PermitRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

/// Short opaque permit number: the first segment of a v4 UUID, uppercased.
/// Uniqueness is enforced by the database, not by generation.
pub fn generate_permit_number() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

impl PermitService {
    pub fn new(
        permit_repository: Arc<dyn PermitRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            permit_repository,
            category_repository,
        }
    }

    /// The duration field the billing mode requires must be present and
    /// at least 1.
    fn check_required_duration(
        category: &PermitCategory,
        duration_days: Option<i32>,
        duration_months: Option<i32>,
    ) -> Result<()> {
        match category.billing_mode {
            BillingMode::Daily => match duration_days {
                Some(days) if days >= 1 => Ok(()),
                Some(_) => Err(ValidationError::InvalidField {
                    field: "durationDays".to_string(),
                    message: "please enter a valid number of days".to_string(),
                }
                .into()),
                None => Err(ValidationError::MissingField("durationDays".to_string()).into()),
            },
            BillingMode::Monthly => match duration_months {
                Some(months) if months >= 1 => Ok(()),
                Some(_) => Err(ValidationError::InvalidField {
                    field: "durationMonths".to_string(),
                    message: "please enter a valid number of months".to_string(),
                }
                .into()),
                None => Err(ValidationError::MissingField("durationMonths".to_string()).into()),
            },
            BillingMode::Yearly | BillingMode::Freeform => Ok(()),
        }
    }

    fn insert_with_number_retry(&self, mut row: PermitDB, generated: bool) -> Result<Permit> {
        match self.permit_repository.insert_permit(row.clone()) {
            Ok(permit) => Ok(permit),
            Err(err) if err.is_conflict() && generated => {
                // One retry with a fresh token covers the negligible
                // collision probability; a second conflict is genuine.
                warn!(
                    "Permit number '{}' collided, retrying with a fresh token",
                    row.permit_number
                );
                row.permit_number = generate_permit_number();
                self.permit_repository.insert_permit(row)
            }
            Err(err) => Err(err),
        }
    }
}

impl PermitServiceTrait for PermitService {
    fn get_permit(&self, permit_id: &str) -> Result<Permit> {
        self.permit_repository.get_permit(permit_id)
    }

    fn get_permits(&self) -> Result<Vec<Permit>> {
        self.permit_repository.get_permits()
    }

    fn get_permits_by_owner(&self, owner_id: &str) -> Result<Vec<Permit>> {
        self.permit_repository.get_permits_by_owner(owner_id)
    }

    /// Creates a new permit: validate, assign a permit number, resolve the
    /// validity period, compute the fee, persist.
    fn create_permit(&self, new_permit: NewPermit) -> Result<Permit> {
        new_permit.validate()?;

        let category = self
            .category_repository
            .get_category(&new_permit.category_id)?;
        let start_date = new_permit.start_date()?;

        Self::check_required_duration(
            &category,
            new_permit.duration_days,
            new_permit.duration_months,
        )?;

        let validity = resolve_validity(
            category.billing_mode,
            start_date,
            new_permit.duration_days,
            new_permit.duration_months,
        );
        let end_date = match category.billing_mode {
            BillingMode::Freeform => new_permit.explicit_end_date()?,
            _ => validity.end_date,
        };

        let total_fee = calculate_permit_fee(
            &category,
            start_date,
            validity.duration_days,
            validity.duration_months,
        );

        let generated = new_permit.permit_number.is_none();
        let number = new_permit
            .permit_number
            .clone()
            .unwrap_or_else(generate_permit_number);

        let now = Utc::now().naive_utc();
        let row = PermitDB {
            id: new_permit.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            category_id: category.id.clone(),
            owner_id: new_permit.owner_id,
            owner_name: new_permit.owner_name,
            permit_number: number,
            start_date,
            end_date,
            duration_days: validity.duration_days,
            duration_months: validity.duration_months,
            total_fee: total_fee.to_string(),
            amount_paid: Decimal::ZERO.to_string(),
            paid: false,
            renewed: false,
            notes: new_permit.notes,
            created_at: now,
            updated_at: now,
        };

        let permit = self.insert_with_number_retry(row, generated)?;
        debug!(
            "Created permit {} ({}) with fee {}",
            permit.permit_number, category.name, permit.total_fee
        );
        Ok(permit)
    }

    /// Updates an existing permit. Editing the start date or a duration
    /// re-derives the end date and total fee; they cannot be set directly.
    fn update_permit(&self, update: PermitUpdate) -> Result<Permit> {
        update.validate()?;

        let existing = self.permit_repository.get_permit(&update.id)?;
        let category = self
            .category_repository
            .get_category(&existing.category_id)?;
        let start_date = update.start_date()?;

        Self::check_required_duration(&category, update.duration_days, update.duration_months)?;

        let validity = resolve_validity(
            category.billing_mode,
            start_date,
            update.duration_days,
            update.duration_months,
        );
        let end_date = match category.billing_mode {
            BillingMode::Freeform => update.explicit_end_date()?,
            _ => validity.end_date,
        };

        let total_fee = calculate_permit_fee(
            &category,
            start_date,
            validity.duration_days,
            validity.duration_months,
        );

        let row = PermitDB {
            id: existing.id,
            category_id: existing.category_id,
            owner_id: existing.owner_id,
            owner_name: update.owner_name,
            permit_number: existing.permit_number,
            start_date,
            end_date,
            duration_days: validity.duration_days,
            duration_months: validity.duration_months,
            total_fee: total_fee.to_string(),
            amount_paid: existing.amount_paid.to_string(),
            paid: existing.paid,
            renewed: existing.renewed,
            notes: update.notes,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        };

        self.permit_repository.update_permit(row)
    }

    fn mark_renewed(&self, permit_id: &str) -> Result<Permit> {
        let existing = self.permit_repository.get_permit(permit_id)?;
        let row = PermitDB {
            id: existing.id,
            category_id: existing.category_id,
            owner_id: existing.owner_id,
            owner_name: existing.owner_name,
            permit_number: existing.permit_number,
            start_date: existing.start_date,
            end_date: existing.end_date,
            duration_days: existing.duration_days,
            duration_months: existing.duration_months,
            total_fee: existing.total_fee.to_string(),
            amount_paid: existing.amount_paid.to_string(),
            paid: existing.paid,
            renewed: true,
            notes: existing.notes,
            created_at: existing.created_at,
            updated_at: Utc::now().naive_utc(),
        };
        self.permit_repository.update_permit(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    use crate::categories::{BillingMode, NewPermitCategory};
    use crate::errors::Error;

    // --- Mock repositories ---

    struct MockCategoryRepository {
        category: PermitCategory,
    }

    impl CategoryRepositoryTrait for MockCategoryRepository {
        fn get_categories(&self) -> Result<Vec<PermitCategory>> {
            Ok(vec![self.category.clone()])
        }

        fn get_category(&self, category_id: &str) -> Result<PermitCategory> {
            if category_id == self.category.id {
                Ok(self.category.clone())
            } else {
                Err(Error::NotFound(format!("Permit category '{}'", category_id)))
            }
        }

        fn get_category_by_name(&self, category_name: &str) -> Result<Option<PermitCategory>> {
            if category_name == self.category.name {
                Ok(Some(self.category.clone()))
            } else {
                Ok(None)
            }
        }

        fn upsert_category(&self, _category: NewPermitCategory) -> Result<PermitCategory> {
            Ok(self.category.clone())
        }
    }

    struct MockPermitRepository {
        // Insert attempts observed, and how many of the first ones to fail
        // with a uniqueness conflict.
        attempts: Mutex<Vec<PermitDB>>,
        conflicts_before_success: Mutex<usize>,
    }

    impl MockPermitRepository {
        fn new(conflicts_before_success: usize) -> Self {
            Self {
                attempts: Mutex::new(Vec::new()),
                conflicts_before_success: Mutex::new(conflicts_before_success),
            }
        }
    }

    impl PermitRepositoryTrait for MockPermitRepository {
        fn get_permit(&self, permit_id: &str) -> Result<Permit> {
            Err(Error::NotFound(format!("Permit '{}'", permit_id)))
        }

        fn get_permit_by_number(&self, _number: &str) -> Result<Option<Permit>> {
            Ok(None)
        }

        fn get_permits(&self) -> Result<Vec<Permit>> {
            Ok(Vec::new())
        }

        fn get_permits_by_owner(&self, _owner_id: &str) -> Result<Vec<Permit>> {
            Ok(Vec::new())
        }

        fn insert_permit(&self, permit: PermitDB) -> Result<Permit> {
            self.attempts.lock().unwrap().push(permit.clone());
            let mut remaining = self.conflicts_before_success.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::Conflict(
                    "UNIQUE constraint failed: permits.permit_number".to_string(),
                ));
            }
            Permit::try_from(permit)
        }

        fn update_permit(&self, permit: PermitDB) -> Result<Permit> {
            Permit::try_from(permit)
        }
    }

    fn daily_category() -> PermitCategory {
        let now = Utc::now().naive_utc();
        PermitCategory {
            id: "cat-daily".to_string(),
            name: "Alcohol Special Event".to_string(),
            billing_mode: BillingMode::Daily,
            registration_fee: dec!(0),
            annual_fee: dec!(0),
            monthly_fee: dec!(0),
            daily_fee: dec!(3000),
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        category: PermitCategory,
        conflicts: usize,
    ) -> (PermitService, Arc<MockPermitRepository>) {
        let permit_repo = Arc::new(MockPermitRepository::new(conflicts));
        let category_repo = Arc::new(MockCategoryRepository { category });
        (
            PermitService::new(permit_repo.clone(), category_repo),
            permit_repo,
        )
    }

    fn new_daily_permit() -> NewPermit {
        NewPermit {
            id: None,
            category_id: "cat-daily".to_string(),
            owner_id: "user-1".to_string(),
            owner_name: "Jane Wanjiru".to_string(),
            permit_number: None,
            start_date: "2024-06-10".to_string(),
            end_date: None,
            duration_days: Some(2),
            duration_months: None,
            notes: None,
        }
    }

    #[test]
    fn create_permit_derives_fee_and_end_date() {
        let (service, _) = service(daily_category(), 0);
        let permit = service.create_permit(new_daily_permit()).unwrap();

        assert_eq!(permit.total_fee, dec!(6000));
        assert_eq!(
            permit.end_date,
            Some(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap())
        );
        assert_eq!(permit.duration_days, Some(2));
        assert_eq!(permit.duration_months, None);
        assert_eq!(permit.permit_number.len(), 8);
        assert_eq!(permit.permit_number, permit.permit_number.to_uppercase());
        assert!(!permit.paid);
    }

    #[test]
    fn create_permit_requires_category_duration() {
        let (service, _) = service(daily_category(), 0);
        let mut input = new_daily_permit();
        input.duration_days = None;

        let err = service.create_permit(input).unwrap_err();
        assert!(err.to_string().contains("durationDays"));
    }

    #[test]
    fn create_permit_rejects_unknown_category() {
        let (service, _) = service(daily_category(), 0);
        let mut input = new_daily_permit();
        input.category_id = "cat-missing".to_string();

        assert!(matches!(
            service.create_permit(input),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn permit_number_collision_retries_once_with_fresh_token() {
        let (service, repo) = service(daily_category(), 1);
        let permit = service.create_permit(new_daily_permit()).unwrap();

        let attempts = repo.attempts.lock().unwrap();
        assert_eq!(attempts.len(), 2);
        assert_ne!(attempts[0].permit_number, attempts[1].permit_number);
        assert_eq!(permit.permit_number, attempts[1].permit_number);
    }

    #[test]
    fn second_collision_fails_hard() {
        let (service, repo) = service(daily_category(), 2);
        let err = service.create_permit(new_daily_permit()).unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(repo.attempts.lock().unwrap().len(), 2);
    }

    #[test]
    fn caller_supplied_number_is_not_regenerated() {
        let (service, repo) = service(daily_category(), 1);
        let mut input = new_daily_permit();
        input.permit_number = Some("FIXED001".to_string());

        let err = service.create_permit(input).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.attempts.lock().unwrap().len(), 1);
    }
}
