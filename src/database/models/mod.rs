pub mod agenda;
pub mod user;

pub use agenda::TaskRecord;
pub use user::UserPermissionRow;
