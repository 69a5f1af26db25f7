//! Stride Coach - adaptive strategy selection for an empathetic
//! physical-activity coaching bot.
//!
//! Per conversational turn the engine decides which empathetic response
//! strategies to apply to a classified utterance, and which stress-relief
//! intervention to offer next, learning online from per-user feedback via a
//! UCB1 bandit over intervention categories.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
