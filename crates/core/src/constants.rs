use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for display percentages
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default look-back window for the spending trend series
pub const DEFAULT_TREND_MONTHS: u32 = 12;

/// Default look-back window for comparison and category trend series
pub const DEFAULT_COMPARISON_MONTHS: u32 = 6;

/// Default page size for transaction search
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Upper bound for a single transaction search page
pub const MAX_PAGE_LIMIT: i64 = 500;

pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_NOTES_LENGTH: usize = 1000;
pub const MAX_RESERVE_NAME_LENGTH: usize = 100;
pub const MAX_RESERVE_PURPOSE_LENGTH: usize = 500;

/// Largest magnitude accepted for a single amount or daily adjustment.
/// Keeps month-level sums far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);
