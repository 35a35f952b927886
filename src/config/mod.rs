// ABOUTME: Configuration module root for tunable calculation coefficients
// ABOUTME: Exposes goal calculation configuration with evidence-based defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Configuration for the calculation layer
//!
//! Coefficients used by the goal formulas live here rather than as literals
//! inside the math, so deployments can tune them without touching the
//! algorithms.

pub mod goals;

pub use goals::{BmrConfig, GoalAdjustmentConfig, GoalConfig, MacroSplitConfig, PalConfig};
