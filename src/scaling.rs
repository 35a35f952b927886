// ABOUTME: Pure nutrient scaling from per-100-gram profiles to actual amounts
// ABOUTME: Applied whenever servings, unit, or the underlying item changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Nutrient scaling
//!
//! Nutrient profiles are stored per 100 g. The actual amount eaten is
//! `servings x gram_amount(unit)` grams, so every scaled value is
//! `servings * gram_amount(unit) * per_hundred / 100`.
//!
//! These functions are total: validation of servings and unit is the
//! caller's responsibility.

use crate::models::{FoodItem, ServingSizeUnit};
use serde::{Deserialize, Serialize};

/// A nutrient profile scaled to an actual selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaledNutrients {
    /// Calories (kcal)
    pub calories: f64,
    /// Carbohydrates (grams)
    pub carbs: f64,
    /// Protein (grams)
    pub protein: f64,
    /// Fat (grams)
    pub fat: f64,
}

/// Scale a single per-100-gram value to a serving selection
#[must_use]
pub fn scale(per_hundred: f64, servings: f64, unit: ServingSizeUnit) -> f64 {
    servings * unit.gram_amount() * per_hundred / 100.0
}

/// Scale a single per-100-gram value to an absolute gram quantity
#[must_use]
pub fn scale_by_quantity(per_hundred: f64, quantity_g: f64) -> f64 {
    quantity_g / 100.0 * per_hundred
}

/// Scale an item's whole nutrient profile to a serving selection
#[must_use]
pub fn scale_item(item: &FoodItem, servings: f64, unit: ServingSizeUnit) -> ScaledNutrients {
    ScaledNutrients {
        calories: scale(item.calories_per_100(), servings, unit),
        carbs: scale(item.carbs_per_100(), servings, unit),
        protein: scale(item.protein_per_100(), servings, unit),
        fat: scale(item.fat_per_100(), servings, unit),
    }
}
