//! # Workflows Module
//!
//! High-level entry points that turn a parsed structure and an
//! [`config::AnalysisConfig`] into finished results.
//!
//! ## Overview
//!
//! A workflow resolves the chain selection, runs the contact search to cut
//! the interface out of each structure, drives the engine analyses and
//! reports progress through a [`progress::ProgressReporter`]. The engine
//! itself never decides which chains or residues form an interface; that is
//! the job of [`build`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated analysis parameters and their builder
//! - **Interface Construction** ([`build`]) - Chain resolution and contact-derived interfaces
//! - **Single Structure Analysis** ([`analyze`]) - Composition and buried surface area report
//! - **Pose Comparison** ([`compare`]) - fcc and interface RMSD of many poses against a reference
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for front ends
//! - **Error Handling** ([`error`]) - Workflow-level failures

pub mod analyze;
pub mod build;
pub mod compare;
pub mod config;
pub mod error;
pub mod progress;
