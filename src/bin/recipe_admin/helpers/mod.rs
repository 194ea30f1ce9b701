// ABOUTME: Helper modules for recipe-admin
// ABOUTME: Console output formatting

pub mod display;
