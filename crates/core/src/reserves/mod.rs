//! Reserves module - savings goals: domain models, services, and traits.

mod reserves_model;
mod reserves_service;
mod reserves_traits;

pub use reserves_model::{NewReserve, Reserve, ReserveTotals, ReserveUpdate, ReserveWithProgress};
pub use reserves_service::ReserveService;
pub use reserves_traits::{ReserveRepositoryTrait, ReserveServiceTrait};
