// src/services/mod.rs
pub mod agent;
pub mod events;
pub mod gem_cache;
pub mod ranking;
