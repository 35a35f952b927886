// ABOUTME: Item overview coordinator for viewing/editing one item in context
// ABOUTME: Three entry modes: recipe ingredient, meal line item, bare search hit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Item overview coordinator
//!
//! Loads a single item for viewing or editing in one of three contexts,
//! resolved once at construction and never re-evaluated. Serving changes
//! only touch local state and rescale the displayed nutrients; `save`
//! persists back to the owning collection, and is an explicit no-op for a
//! bare search hit that has no owning collection yet.
//!
//! A failed initial lookup is a construction-time error: the coordinator is
//! simply never built, which mirrors the screen being unusable until
//! resolved externally.

use crate::errors::{AppError, AppResult};
use crate::models::{FoodItem, Ingredient, MealFoodItem, ServingSizeUnit};
use crate::scaling::{scale_item, ScaledNutrients};
use crate::selection::SelectionStore;
use crate::sources::{FoodCatalogSource, MealStore, RecipeStore};
use std::sync::Arc;

/// Entry context for the overview, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewMode {
    /// An ingredient of a recipe
    FromIngredient {
        /// Owning recipe id
        recipe_id: String,
        /// Ingredient's product id
        item_id: String,
    },
    /// A food line item of a meal
    FromMealLineItem {
        /// Owning meal id
        meal_id: String,
        /// Line item's product id
        item_id: String,
    },
    /// A bare search hit with no owning collection
    FromSearchResult {
        /// Item id
        item_id: String,
    },
}

/// External collaborators the overview loads from and saves to
#[derive(Clone)]
pub struct OverviewDeps {
    /// Catalog used as fallback lookup for search hits
    pub catalog: Arc<dyn FoodCatalogSource>,
    /// Recipe collection owning ingredients
    pub recipes: Arc<dyn RecipeStore>,
    /// Meal collection owning line items
    pub meals: Arc<dyn MealStore>,
    /// Shared session state, checked first for search hits
    pub selection: SelectionStore,
}

/// One loaded item with its local serving selection and scaled nutrients
pub struct ItemOverviewCoordinator {
    mode: OverviewMode,
    deps: OverviewDeps,
    item: FoodItem,
    servings: f64,
    serving_size_unit: ServingSizeUnit,
    scaled: ScaledNutrients,
}

impl std::fmt::Debug for ItemOverviewCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemOverviewCoordinator")
            .field("mode", &self.mode)
            .field("item", &self.item)
            .field("servings", &self.servings)
            .field("serving_size_unit", &self.serving_size_unit)
            .field("scaled", &self.scaled)
            .finish_non_exhaustive()
    }
}

impl ItemOverviewCoordinator {
    /// Resolve the mode and load the base item
    ///
    /// Search hits are looked up in the [`SelectionStore`] snapshot first
    /// (cheap, in-memory) before falling back to the catalog. Ingredient and
    /// line-item modes seed servings and unit from the loaded record.
    ///
    /// # Errors
    ///
    /// Fails with a not-found error when the identifiers resolve to nothing;
    /// the coordinator is not constructed in that case.
    pub async fn load(mode: OverviewMode, deps: OverviewDeps) -> AppResult<Self> {
        let (item, servings, serving_size_unit) = match &mode {
            OverviewMode::FromSearchResult { item_id } => {
                let item = if let Some(found) = deps.selection.find(item_id) {
                    found
                } else {
                    FoodItem::Product(deps.catalog.get_by_id(item_id).await?)
                };
                let servings = item.servings();
                let unit = item.serving_size_unit();
                (item, servings, unit)
            }
            OverviewMode::FromIngredient { recipe_id, item_id } => {
                let ingredient = deps.recipes.get_ingredient(recipe_id, item_id).await?;
                (
                    FoodItem::Product(ingredient.product),
                    ingredient.servings,
                    ingredient.serving_size_unit,
                )
            }
            OverviewMode::FromMealLineItem { meal_id, item_id } => {
                let line = deps.meals.get_food_item(meal_id, item_id).await?;
                (
                    FoodItem::Product(line.product),
                    line.servings,
                    line.serving_size_unit,
                )
            }
        };

        let scaled = scale_item(&item, servings, serving_size_unit);
        tracing::debug!(id = item.id(), ?mode, "item overview loaded");
        Ok(Self {
            mode,
            deps,
            item,
            servings,
            serving_size_unit,
            scaled,
        })
    }

    /// Entry mode this overview was constructed with
    #[must_use]
    pub const fn mode(&self) -> &OverviewMode {
        &self.mode
    }

    /// The loaded base item
    #[must_use]
    pub const fn item(&self) -> &FoodItem {
        &self.item
    }

    /// Current local servings selection
    #[must_use]
    pub const fn servings(&self) -> f64 {
        self.servings
    }

    /// Current local unit selection
    #[must_use]
    pub const fn serving_size_unit(&self) -> ServingSizeUnit {
        self.serving_size_unit
    }

    /// Nutrients scaled to the current selection
    #[must_use]
    pub const fn scaled(&self) -> ScaledNutrients {
        self.scaled
    }

    /// Change the servings count; rescales, no persistence side effect
    pub fn change_servings(&mut self, servings: f64) {
        self.servings = servings;
        self.rescale();
    }

    /// Change the serving-size unit; rescales, no persistence side effect
    pub fn change_serving_size_unit(&mut self, unit: ServingSizeUnit) {
        self.serving_size_unit = unit;
        self.rescale();
    }

    fn rescale(&mut self) {
        self.scaled = scale_item(&self.item, self.servings, self.serving_size_unit);
    }

    /// Persist the local serving selection back to the owning collection
    ///
    /// A bare search hit has no owning collection yet, so saving in search
    /// mode is explicitly ignored rather than treated as an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the owning store write fails; local state
    /// is left untouched so the user can retry.
    pub async fn save(&self) -> AppResult<()> {
        match &self.mode {
            OverviewMode::FromIngredient { recipe_id, .. } => {
                let product = self.product()?;
                let ingredient = Ingredient {
                    recipe_id: recipe_id.clone(),
                    product,
                    servings: self.servings,
                    serving_size_unit: self.serving_size_unit,
                };
                self.deps.recipes.update_ingredient(&ingredient).await
            }
            OverviewMode::FromMealLineItem { meal_id, .. } => {
                let product = self.product()?;
                let line = MealFoodItem {
                    meal_id: meal_id.clone(),
                    quantity: self.servings * self.serving_size_unit.gram_amount(),
                    product,
                    servings: self.servings,
                    serving_size_unit: self.serving_size_unit,
                };
                self.deps.meals.update_food_item(&line).await
            }
            OverviewMode::FromSearchResult { item_id } => {
                tracing::debug!(item_id, "save ignored for bare search hit");
                Ok(())
            }
        }
    }

    /// Delete the meal that owns this line item, wholesale
    ///
    /// # Errors
    ///
    /// Returns a validation error outside meal-line-item mode, a not-found
    /// error if the meal no longer exists, and a storage error if the delete
    /// fails.
    pub async fn delete_owning_meal(&self) -> AppResult<()> {
        let OverviewMode::FromMealLineItem { meal_id, .. } = &self.mode else {
            return Err(AppError::invalid_input(
                "only a meal line item has an owning meal to delete",
            ));
        };
        let meal = self.deps.meals.get_by_id(meal_id).await?;
        tracing::info!(meal_id = %meal.id, "deleting owning meal wholesale");
        self.deps.meals.delete(&meal.id).await
    }

    fn product(&self) -> AppResult<crate::models::FoodProduct> {
        match &self.item {
            FoodItem::Product(product) => Ok(product.clone()),
            FoodItem::Recipe(recipe) => Err(AppError::internal(format!(
                "expected a product-backed item, found recipe {}",
                recipe.id
            ))),
        }
    }
}
