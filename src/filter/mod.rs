pub mod error;
pub mod fields;
pub mod filter_where;
pub mod predicate;
pub mod query;
pub mod types;

pub use error::FilterError;
pub use predicate::{FilterTarget, Predicate};
pub use query::TaskQuery;
pub use types::*;
