//! Core library for the `htdiff` CLI.
//!
//! This crate provides the internal building blocks used by the binary: the
//! request transport, response normalization, the equivalence engine, the
//! HTML diff reporter, and the table-driven scenario library. The primary
//! user-facing interface is the `htdiff` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod compare;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod report;
pub mod response;
pub mod runner;
pub mod scenarios;
pub mod transport;
