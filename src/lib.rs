// ABOUTME: Main library entry point for the meal composition and nutrition core
// ABOUTME: Exposes search coordination, selection state, scaling, and goal math
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![deny(unsafe_code)]

//! # Mealtrack Core
//!
//! An in-process engine for assembling meals from food items drawn from two
//! heterogeneous sources: a remote catalog of food products and a
//! locally-owned recipe collection. It searches both concurrently, tracks a
//! working selection across screens, and computes per-item and per-meal
//! nutrient totals that scale with serving count and serving-size unit.
//!
//! ## Architecture
//!
//! - **Models**: food products, recipes, meals, line items, user profiles
//! - **Sources**: traits the embedding app implements for its catalog and
//!   database ([`sources`])
//! - **Scaling**: pure per-100-gram nutrient scaling ([`scaling`])
//! - **Goals**: BMR/PAL-based daily calorie and macro targets ([`goals`])
//! - **Selection**: cross-screen shared combined list ([`selection`])
//! - **Search**: concurrent two-source search with accumulating merge
//!   ([`search`])
//! - **Meals**: aggregation of a selection into a persisted meal ([`meals`])
//! - **Overview**: single-item view/edit in three contexts ([`overview`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealtrack_core::config::GoalConfig;
//! use mealtrack_core::goals::calculate_daily_goals;
//! use mealtrack_core::models::{ActivityLevel, Gender, UserProfile, WeightGoal};
//! use chrono::NaiveDate;
//!
//! let profile = UserProfile {
//!     birthdate: NaiveDate::from_ymd_opt(1996, 1, 1).unwrap(),
//!     gender: Gender::Male,
//!     height_cm: 175.0,
//!     weight_kg: 70.0,
//!     target_weight_kg: 65.0,
//!     activity_level: ActivityLevel::Regular,
//!     weight_goal: WeightGoal::Lose,
//!     goals: None,
//! };
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let goals = calculate_daily_goals(&profile, today, &GoalConfig::default());
//! assert_eq!(goals.calories, 2633);
//! ```

pub mod config;
pub mod errors;
pub mod goals;
pub mod logging;
pub mod meals;
pub mod models;
pub mod overview;
pub mod scaling;
pub mod search;
pub mod selection;
pub mod sources;

pub use errors::{AppError, AppResult, ErrorCode};
pub use meals::MealAggregator;
pub use overview::{ItemOverviewCoordinator, OverviewDeps, OverviewMode};
pub use search::{SearchCoordinator, SearchSnapshot, SearchStatus, SearchTab};
pub use selection::SelectionStore;
