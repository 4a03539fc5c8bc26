//! Core business logic module
//!
//! # Submodules
//!
//! - [`component`] - Component, quality spec and manifest model
//! - [`status`] - Build status taxonomy and build records
//! - [`quality`] - Pre-build quality gate
//! - [`planner`] - Dependency ordering
//! - [`builder`] - Builder capability contract and registry
//! - [`pipeline`] - Sequential orchestration of quality gate and builders
//! - [`report`] - Run results and status totals
//! - [`manifest`] - Manifest loading and component discovery
//! - [`settings`] - Project settings file

pub mod builder;
pub mod component;
pub mod manifest;
pub mod pipeline;
pub mod planner;
pub mod quality;
pub mod report;
pub mod settings;
pub mod status;
