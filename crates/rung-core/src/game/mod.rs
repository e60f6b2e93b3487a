pub mod serialization;
pub mod session;
