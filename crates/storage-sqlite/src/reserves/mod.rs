//! SQLite storage implementation for reserves.

mod model;
mod repository;

pub use model::{ReserveChangesetDB, ReserveDB};
pub use repository::ReserveRepository;
