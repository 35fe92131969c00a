pub mod codes;
pub mod error;
pub mod gateway;
pub mod id;
pub mod money;
pub mod outcome;
pub mod response;
pub mod trade;
