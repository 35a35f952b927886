// ABOUTME: Meal aggregation turning a selected item set into a persisted meal
// ABOUTME: Validates day-time slot and non-empty selection, sums scaled nutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Meal aggregator
//!
//! Partitions a selection into product-backed and recipe-backed line items,
//! validates the required fields, and persists through the [`MealStore`]
//! with a single atomic store call. When targeting an existing meal the new
//! line items are appended to its lists; when creating, aggregate nutrient
//! totals are computed as the sum of every line item's profile scaled by its
//! quantity.

use crate::errors::{AppError, AppResult};
use crate::models::{DayTime, FoodItem, FoodProduct, Meal, MealFoodItem, MealRecipeItem, Recipe};
use crate::scaling::scale_by_quantity;
use crate::sources::MealStore;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

/// Builds and persists meals from a selected item set
#[derive(Clone)]
pub struct MealAggregator {
    store: Arc<dyn MealStore>,
}

impl MealAggregator {
    /// Create an aggregator over the given store
    #[must_use]
    pub fn new(store: Arc<dyn MealStore>) -> Self {
        Self { store }
    }

    /// Persist the selection as a meal
    ///
    /// With `meal_id` present the new line items are appended to that meal
    /// (editing mode); otherwise a new meal is created with freshly computed
    /// aggregate totals. Either way exactly one store write is made, so no
    /// partial meal is ever left persisted.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `day_time` is `None` or the selection
    /// is empty, a not-found error if `meal_id` does not resolve, and a
    /// storage error if the write fails. The in-memory selection is the
    /// caller's to clear on success.
    pub async fn submit(
        &self,
        selection: &[FoodItem],
        day_time: Option<DayTime>,
        meal_id: Option<&str>,
        date: NaiveDate,
    ) -> AppResult<Meal> {
        let Some(day_time) = day_time else {
            return Err(AppError::missing_field("day time slot"));
        };
        if selection.is_empty() {
            return Err(AppError::invalid_input(
                "A meal needs at least one food item or recipe",
            ));
        }

        match meal_id {
            Some(id) => self.append_to_existing(selection, day_time, id).await,
            None => self.create_new(selection, day_time, date).await,
        }
    }

    async fn append_to_existing(
        &self,
        selection: &[FoodItem],
        day_time: DayTime,
        meal_id: &str,
    ) -> AppResult<Meal> {
        let mut meal = self.store.get_by_id(meal_id).await?;
        meal.day_time = day_time;
        append_selection(&mut meal, selection);

        tracing::info!(
            meal_id,
            appended = selection.len(),
            "appending line items to existing meal"
        );
        self.store.update(&meal).await?;
        Ok(meal)
    }

    async fn create_new(
        &self,
        selection: &[FoodItem],
        day_time: DayTime,
        date: NaiveDate,
    ) -> AppResult<Meal> {
        let mut meal = Meal {
            id: Uuid::new_v4().to_string(),
            date,
            day_time,
            calories: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            food_items: Vec::new(),
            recipe_items: Vec::new(),
        };
        append_selection(&mut meal, selection);

        tracing::info!(
            meal_id = %meal.id,
            foods = meal.food_items.len(),
            recipes = meal.recipe_items.len(),
            calories = meal.calories,
            "persisting new meal"
        );
        self.store.add(&meal).await?;
        Ok(meal)
    }
}

/// Append every selected item to the meal's line item lists and totals
fn append_selection(meal: &mut Meal, selection: &[FoodItem]) {
    let meal_id = meal.id.clone();
    for item in selection {
        match item {
            FoodItem::Product(product) => {
                let line = food_line(&meal_id, product);
                add_scaled(meal, item, line.quantity);
                meal.food_items.push(line);
            }
            FoodItem::Recipe(recipe) => {
                let line = recipe_line(&meal_id, recipe);
                add_scaled(meal, item, line.quantity);
                meal.recipe_items.push(line);
            }
        }
    }
}

/// Wrap a product selection as a meal line; quantity defaults to the item's
/// own servings x unit at time of add
fn food_line(meal_id: &str, product: &FoodProduct) -> MealFoodItem {
    MealFoodItem {
        meal_id: meal_id.to_owned(),
        product: product.clone(),
        servings: product.servings,
        serving_size_unit: product.serving_size_unit,
        quantity: product.quantity(),
    }
}

fn recipe_line(meal_id: &str, recipe: &Recipe) -> MealRecipeItem {
    MealRecipeItem {
        meal_id: meal_id.to_owned(),
        recipe: recipe.clone(),
        servings: recipe.servings,
        serving_size_unit: recipe.serving_size_unit,
        quantity: recipe.quantity(),
    }
}

/// Add one line item's scaled nutrient contribution to the meal totals
fn add_scaled(meal: &mut Meal, item: &FoodItem, quantity: f64) {
    meal.calories += scale_by_quantity(item.calories_per_100(), quantity);
    meal.carbs += scale_by_quantity(item.carbs_per_100(), quantity);
    meal.protein += scale_by_quantity(item.protein_per_100(), quantity);
    meal.fat += scale_by_quantity(item.fat_per_100(), quantity);
}
