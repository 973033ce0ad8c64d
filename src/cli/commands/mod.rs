pub mod classify;
pub mod detect;
pub mod widen;
