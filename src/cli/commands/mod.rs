pub mod admin;
pub mod auth;
pub mod course;
pub mod mock;
pub mod profile;
pub mod project;
