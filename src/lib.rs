//! Passport Guide: stepper, fee calculator and scripted assistant for the
//! passport application guide.

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod fees;
pub mod guide;
pub mod steps;
pub mod store;
