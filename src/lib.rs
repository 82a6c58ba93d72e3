//! nupick - Pick which outdated NuGet packages to upgrade
//!
//! This library provides the core functionality for selective upgrades in a
//! .NET workspace:
//! - Aggregating `dotnet list package --outdated --format json` output
//! - Presenting one candidate per package id for selection
//! - Running `dotnet outdated --upgrade` restricted to the chosen packages

pub mod cli;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod log;
pub mod orchestrator;
pub mod output;
pub mod present;
pub mod process;
pub mod progress;
pub mod select;
pub mod toolchain;
