//! JSON response bodies shaped like the forge APIs, shared by the tests.

pub mod branch;
pub mod repository;
