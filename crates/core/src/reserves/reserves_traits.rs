use rust_decimal::Decimal;

use crate::errors::Result;
use crate::reserves::reserves_model::{
    NewReserve, Reserve, ReserveTotals, ReserveUpdate, ReserveWithProgress,
};
use async_trait::async_trait;

/// Trait for reserve repository operations.
///
/// `get_total_current_amount` is the reserve query port: the sum of all
/// current balances at the moment of the call, not scoped to any date.
#[async_trait]
pub trait ReserveRepositoryTrait: Send + Sync {
    fn get_total_current_amount(&self) -> Result<Decimal>;
    fn get_reserve(&self, reserve_id: &str) -> Result<Reserve>;
    /// Newest first.
    fn list_reserves(&self) -> Result<Vec<Reserve>>;
    async fn create_reserve(&self, new_reserve: NewReserve) -> Result<Reserve>;
    async fn update_reserve(&self, reserve_id: &str, update: ReserveUpdate) -> Result<Reserve>;
    async fn delete_reserve(&self, reserve_id: &str) -> Result<()>;
    /// Adds `delta` to the current balance atomically. Fails with
    /// `InvalidArgument` and leaves the row untouched if the balance would
    /// drop below zero.
    async fn adjust_current_amount(&self, reserve_id: &str, delta: Decimal) -> Result<Reserve>;
}

/// Trait for reserve service operations
#[async_trait]
pub trait ReserveServiceTrait: Send + Sync {
    fn get_reserves(&self) -> Result<Vec<ReserveWithProgress>>;
    fn get_reserve(&self, reserve_id: &str) -> Result<ReserveWithProgress>;
    fn get_totals(&self) -> Result<ReserveTotals>;
    async fn create_reserve(&self, new_reserve: NewReserve) -> Result<ReserveWithProgress>;
    async fn update_reserve(
        &self,
        reserve_id: &str,
        update: ReserveUpdate,
    ) -> Result<ReserveWithProgress>;
    async fn delete_reserve(&self, reserve_id: &str) -> Result<()>;
    async fn allocate(&self, reserve_id: &str, amount: Decimal) -> Result<ReserveWithProgress>;
    async fn withdraw(&self, reserve_id: &str, amount: Decimal) -> Result<ReserveWithProgress>;
}
