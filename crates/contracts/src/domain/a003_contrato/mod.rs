pub mod aggregate;
pub mod sync;
