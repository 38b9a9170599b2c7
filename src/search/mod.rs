pub mod gateway;
pub mod query;
