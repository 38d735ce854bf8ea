//! HTTP inbound adapter exposing the teams REST endpoints.

pub mod error;
pub mod health;
pub mod identity;
pub mod links;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;
pub mod team_membership;
#[cfg(test)]
pub mod test_utils;
pub mod topics;
pub mod topics_admin;

pub use error::ApiResult;
