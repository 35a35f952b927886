// ABOUTME: Meal domain models with day-time slots and quantity-bearing line items
// ABOUTME: MealLineItem sum type wraps product or recipe snapshots per meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use super::food::{FoodProduct, Recipe, ServingSizeUnit};
use crate::errors::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time-of-day slot a meal belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayTime {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl FromStr for DayTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            other => Err(AppError::invalid_input(format!(
                "unknown day time slot: {other}"
            ))),
        }
    }
}

/// A food-product line inside a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealFoodItem {
    /// Owning meal id
    pub meal_id: String,
    /// Snapshot of the product at the time it was added
    pub product: FoodProduct,
    /// Number of servings
    pub servings: f64,
    /// Serving-size unit
    pub serving_size_unit: ServingSizeUnit,
    /// Grams this line amounts to (servings x unit gram amount)
    pub quantity: f64,
}

impl MealFoodItem {
    /// Id of the wrapped product
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.product.id
    }
}

/// A recipe line inside a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecipeItem {
    /// Owning meal id
    pub meal_id: String,
    /// Snapshot of the recipe at the time it was added
    pub recipe: Recipe,
    /// Number of servings
    pub servings: f64,
    /// Serving-size unit
    pub serving_size_unit: ServingSizeUnit,
    /// Grams this line amounts to (servings x unit gram amount)
    pub quantity: f64,
}

impl MealRecipeItem {
    /// Id of the wrapped recipe
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.recipe.id
    }
}

/// Either kind of meal line, for call sites that treat lines generically
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealLineItem {
    /// Product-backed line
    Food(MealFoodItem),
    /// Recipe-backed line
    Recipe(MealRecipeItem),
}

impl MealLineItem {
    /// Id of the wrapped item
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Food(f) => f.item_id(),
            Self::Recipe(r) => r.item_id(),
        }
    }

    /// Grams this line amounts to
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        match self {
            Self::Food(f) => f.quantity,
            Self::Recipe(r) => r.quantity,
        }
    }
}

/// A persisted meal: a dated, slotted collection of line items with
/// aggregate nutrient totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Stable identity
    pub id: String,
    /// Calendar date of the meal
    pub date: NaiveDate,
    /// Time-of-day slot
    pub day_time: DayTime,
    /// Total calories over all line items
    pub calories: f64,
    /// Total carbohydrates over all line items (grams)
    pub carbs: f64,
    /// Total protein over all line items (grams)
    pub protein: f64,
    /// Total fat over all line items (grams)
    pub fat: f64,
    /// Product-backed lines
    pub food_items: Vec<MealFoodItem>,
    /// Recipe-backed lines
    pub recipe_items: Vec<MealRecipeItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_time_parses_case_insensitively() {
        assert_eq!("Breakfast".parse::<DayTime>().ok(), Some(DayTime::Breakfast));
        assert_eq!("SNACK".parse::<DayTime>().ok(), Some(DayTime::Snack));
        assert!("brunch".parse::<DayTime>().is_err());
    }
}
