// ABOUTME: Domain model module root for food, meal, and profile types
// ABOUTME: Re-exports the full data model consumed by the coordinators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Domain models
//!
//! Transient instances of these types are created during a search/compose
//! session; they become durable only when a meal or recipe is persisted
//! through the owning store.

pub mod food;
pub mod meal;
pub mod profile;

pub use food::{FoodItem, FoodProduct, Ingredient, Recipe, ServingSizeUnit, Visibility};
pub use meal::{DayTime, Meal, MealFoodItem, MealLineItem, MealRecipeItem};
pub use profile::{ActivityLevel, DailyGoals, Gender, UserProfile, WeightGoal};
