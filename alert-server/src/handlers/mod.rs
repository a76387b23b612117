//! HTTP handlers

pub mod health;
pub mod predict;
pub mod data;

#[cfg(test)]
mod tests;
