//! HTTP handlers for the Projects domain

pub mod insights;
pub mod projects;
