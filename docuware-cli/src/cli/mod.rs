//! Command handlers

pub mod commands;
