// ABOUTME: Command modules for recipe-admin
// ABOUTME: User management and read-only catalog listings

pub mod catalog;
pub mod user;
