//! Cart and checkout domain services with their `PostgreSQL` persistence.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
