//! Deadline traffic light ("semáforo do fatal").
//!
//! Tasks are bucketed by the number of calendar days between "today" and their
//! fatal deadline. The reverse direction infers a bucket from a filter range so
//! the query layer can over-fetch with a widened range and re-filter exactly.

pub mod bucket;
pub mod calendar;
pub mod classifier;

pub use bucket::{Bucket, BucketDisplay};
pub use classifier::{classify, classify_instant, detect_bucket, retain_bucket, widen_range_for_bucket, Deadline};
