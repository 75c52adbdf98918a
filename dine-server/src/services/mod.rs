//! Business services: guard checks, transactions and invariants live here;
//! handlers in `api` only extract and serialize.

pub mod booking;
pub mod order;
pub mod restaurant;
