use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::reserves_model::{
    NewReserve, ReserveTotals, ReserveUpdate, ReserveWithProgress,
};
use super::reserves_traits::{ReserveRepositoryTrait, ReserveServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::decimal_utils::validate_amount_range;

pub struct ReserveService {
    repository: Arc<dyn ReserveRepositoryTrait>,
}

impl ReserveService {
    pub fn new(repository: Arc<dyn ReserveRepositoryTrait>) -> Self {
        ReserveService { repository }
    }

    fn ensure_positive(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_argument("amount must be greater than 0"));
        }
        validate_amount_range("amount", amount)
    }
}

#[async_trait]
impl ReserveServiceTrait for ReserveService {
    fn get_reserves(&self) -> Result<Vec<ReserveWithProgress>> {
        Ok(self
            .repository
            .list_reserves()?
            .into_iter()
            .map(ReserveWithProgress::from)
            .collect())
    }

    fn get_reserve(&self, reserve_id: &str) -> Result<ReserveWithProgress> {
        self.repository
            .get_reserve(reserve_id)
            .map(ReserveWithProgress::from)
    }

    fn get_totals(&self) -> Result<ReserveTotals> {
        let reserves = self.repository.list_reserves()?;
        ReserveTotals::from_reserves(&reserves)
    }

    async fn create_reserve(&self, new_reserve: NewReserve) -> Result<ReserveWithProgress> {
        new_reserve.validate()?;
        let created = self.repository.create_reserve(new_reserve).await?;
        debug!("Created reserve {} ({})", created.id, created.name);
        Ok(created.into())
    }

    async fn update_reserve(
        &self,
        reserve_id: &str,
        update: ReserveUpdate,
    ) -> Result<ReserveWithProgress> {
        update.validate()?;
        if update.is_empty() {
            return self.get_reserve(reserve_id);
        }
        let updated = self.repository.update_reserve(reserve_id, update).await?;
        Ok(updated.into())
    }

    async fn delete_reserve(&self, reserve_id: &str) -> Result<()> {
        self.repository.delete_reserve(reserve_id).await
    }

    async fn allocate(&self, reserve_id: &str, amount: Decimal) -> Result<ReserveWithProgress> {
        Self::ensure_positive(amount)?;
        let reserve = self
            .repository
            .adjust_current_amount(reserve_id, amount)
            .await?;
        debug!("Allocated {} to reserve {}", amount, reserve_id);
        Ok(reserve.into())
    }

    async fn withdraw(&self, reserve_id: &str, amount: Decimal) -> Result<ReserveWithProgress> {
        Self::ensure_positive(amount)?;
        let reserve = self
            .repository
            .adjust_current_amount(reserve_id, -amount)
            .await?;
        debug!("Withdrew {} from reserve {}", amount, reserve_id);
        Ok(reserve.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, ValidationError};
    use crate::reserves::Reserve;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    // ============== Mock Repositories ==============

    #[derive(Default)]
    struct MockReserveRepository {
        reserves: RwLock<Vec<Reserve>>,
    }

    impl MockReserveRepository {
        fn not_found(reserve_id: &str) -> Error {
            Error::Database(DatabaseError::NotFound(reserve_id.to_string()))
        }
    }

    #[async_trait]
    impl ReserveRepositoryTrait for MockReserveRepository {
        fn get_total_current_amount(&self) -> Result<Decimal> {
            Ok(self
                .reserves
                .read()
                .unwrap()
                .iter()
                .map(|r| r.current_amount)
                .sum())
        }

        fn get_reserve(&self, reserve_id: &str) -> Result<Reserve> {
            self.reserves
                .read()
                .unwrap()
                .iter()
                .find(|r| r.id == reserve_id)
                .cloned()
                .ok_or_else(|| Self::not_found(reserve_id))
        }

        fn list_reserves(&self) -> Result<Vec<Reserve>> {
            Ok(self.reserves.read().unwrap().iter().rev().cloned().collect())
        }

        async fn create_reserve(&self, new_reserve: NewReserve) -> Result<Reserve> {
            let now = Utc::now().naive_utc();
            let reserve = Reserve {
                id: format!("reserve-{}", self.reserves.read().unwrap().len() + 1),
                name: new_reserve.name,
                target_amount: new_reserve.target_amount,
                current_amount: new_reserve.current_amount.unwrap_or_default(),
                purpose: new_reserve.purpose,
                created_at: now,
                updated_at: now,
            };
            self.reserves.write().unwrap().push(reserve.clone());
            Ok(reserve)
        }

        async fn update_reserve(&self, _: &str, _: ReserveUpdate) -> Result<Reserve> {
            unimplemented!()
        }

        async fn delete_reserve(&self, _: &str) -> Result<()> {
            unimplemented!()
        }

        async fn adjust_current_amount(&self, reserve_id: &str, delta: Decimal) -> Result<Reserve> {
            let mut reserves = self.reserves.write().unwrap();
            let reserve = reserves
                .iter_mut()
                .find(|r| r.id == reserve_id)
                .ok_or_else(|| Self::not_found(reserve_id))?;
            let next = reserve.current_amount + delta;
            if next < Decimal::ZERO {
                return Err(Error::invalid_argument("insufficient funds in reserve"));
            }
            reserve.current_amount = next;
            Ok(reserve.clone())
        }
    }

    // ============== Helper Functions ==============

    async fn service_with_reserve(
        target: Decimal,
        current: Decimal,
    ) -> (ReserveService, String) {
        let service = ReserveService::new(Arc::new(MockReserveRepository::default()));
        let created = service
            .create_reserve(NewReserve {
                name: "Vacation".to_string(),
                target_amount: target,
                current_amount: Some(current),
                purpose: None,
            })
            .await
            .unwrap();
        (service, created.reserve.id)
    }

    // ============== Tests ==============

    #[tokio::test]
    async fn test_allocate_increases_balance_and_progress() {
        let (service, id) = service_with_reserve(dec!(50000), dec!(10000)).await;
        let updated = service.allocate(&id, dec!(5000)).await.unwrap();
        assert_eq!(updated.reserve.current_amount, dec!(15000));
        assert_eq!(updated.completion_percentage, dec!(30));
        assert_eq!(updated.remaining_amount, dec!(35000));
    }

    #[tokio::test]
    async fn test_withdraw_beyond_balance_is_rejected() {
        let (service, id) = service_with_reserve(dec!(50000), dec!(10000)).await;
        let result = service.withdraw(&id, dec!(10000.01)).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidArgument(_)))
        ));
        assert_eq!(
            service.get_reserve(&id).unwrap().reserve.current_amount,
            dec!(10000)
        );

        let drained = service.withdraw(&id, dec!(10000)).await.unwrap();
        assert_eq!(drained.reserve.current_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_non_positive_amounts_are_rejected() {
        let (service, id) = service_with_reserve(dec!(100), dec!(0)).await;
        assert!(service.allocate(&id, Decimal::ZERO).await.is_err());
        assert!(service.withdraw(&id, dec!(-5)).await.is_err());
    }

    #[tokio::test]
    async fn test_allocation_above_ceiling_is_rejected() {
        let (service, id) = service_with_reserve(dec!(100), dec!(0)).await;
        let result = service
            .allocate(&id, crate::constants::MAX_AMOUNT + dec!(1))
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidArgument(_)))
        ));
        assert_eq!(
            service.get_reserve(&id).unwrap().reserve.current_amount,
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_totals_reflect_all_reserves() {
        let (service, _) = service_with_reserve(dec!(50000), dec!(50000)).await;
        service
            .create_reserve(NewReserve {
                name: "Car".to_string(),
                target_amount: dec!(800000),
                current_amount: None,
                purpose: Some("New car".to_string()),
            })
            .await
            .unwrap();

        let totals = service.get_totals().unwrap();
        assert_eq!(totals.total_reserves, 2);
        assert_eq!(totals.total_current_amount, dec!(50000));
        assert_eq!(totals.fully_funded_reserves, 1);
        assert_eq!(totals.empty_reserves, 1);
        assert_eq!(service.get_reserves().unwrap()[0].reserve.name, "Car");
    }
}
