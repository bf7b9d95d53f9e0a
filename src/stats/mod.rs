//! Pure aggregation and presentation helpers, independent of the database layer.

pub mod bandwidth;
pub mod format;
pub mod search;
pub mod usage;
