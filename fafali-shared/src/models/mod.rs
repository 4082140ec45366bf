pub mod account;
pub mod records;
pub mod session;
