//! Users owned by the authentication subsystem. Only what seeding and
//! booking display need lives here.

pub mod password;
pub mod repo;
pub mod repo_types;
