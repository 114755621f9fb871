//! Pointing Poker - Real-time planning poker sessions
//!
//! This crate implements an estimation table where a team picks cards in
//! private, reveals them together and sees the tally, with live updates
//! pushed to every seated participant.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
