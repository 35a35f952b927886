// ABOUTME: Collaborator traits for the catalog, recipe, meal, and profile stores
// ABOUTME: Shared request/response contract the coordinators are written against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Collaborator interfaces
//!
//! The crate is an in-process library; everything outside it (network
//! catalog, local database) is reached through these traits. Search calls
//! return streams of incremental partial-result batches, each batch a
//! success or an error on its own; list observation returns a stream of
//! whole current lists.
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync` for concurrent access across
//! async tasks.

use crate::errors::AppResult;
use crate::models::{FoodProduct, Ingredient, Meal, MealFoodItem, Recipe, UserProfile};
use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// A stream of incremental partial-result batches
pub type BatchStream<T> = BoxStream<'static, AppResult<Vec<T>>>;

/// A stream of whole current lists
pub type ListStream<T> = BoxStream<'static, Vec<T>>;

/// Remote/catalog food-product lookup
#[async_trait]
pub trait FoodCatalogSource: Send + Sync {
    /// Search the catalog; batches arrive incrementally until the stream ends
    async fn search(&self, query: &str, language: &str) -> BatchStream<FoodProduct>;

    /// Look a product up by id
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceNotFound`] if no product
    /// has this id.
    async fn get_by_id(&self, id: &str) -> AppResult<FoodProduct>;
}

/// Locally-owned recipe collection
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Search stored recipes; batches arrive incrementally
    async fn search(&self, query: &str) -> BatchStream<Recipe>;

    /// Observe the user's own recipes; emits the full current list on every
    /// change, starting with the present one
    async fn observe_owned(&self) -> ListStream<Recipe>;

    /// Load a recipe by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the recipe does not exist.
    async fn get_by_id(&self, id: &str) -> AppResult<Recipe>;

    /// Load one ingredient of a recipe by `(recipe_id, item_id)`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if either the recipe or the ingredient is
    /// missing.
    async fn get_ingredient(&self, recipe_id: &str, item_id: &str) -> AppResult<Ingredient>;

    /// Persist a changed recipe
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn update(&self, recipe: &Recipe) -> AppResult<()>;

    /// Persist a changed ingredient back into its owning recipe
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn update_ingredient(&self, ingredient: &Ingredient) -> AppResult<()>;
}

/// Persisted meals and their line items
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Load a meal by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the meal does not exist.
    async fn get_by_id(&self, id: &str) -> AppResult<Meal>;

    /// Persist a new meal
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn add(&self, meal: &Meal) -> AppResult<()>;

    /// Persist changes to an existing meal
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn update(&self, meal: &Meal) -> AppResult<()>;

    /// Delete a meal wholesale, including its line items
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Load one food line item of a meal by `(meal_id, item_id)`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if either the meal or the line item is
    /// missing.
    async fn get_food_item(&self, meal_id: &str, item_id: &str) -> AppResult<MealFoodItem>;

    /// Persist a changed food line item
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn update_food_item(&self, item: &MealFoodItem) -> AppResult<()>;
}

/// A user's physical attributes and goals
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    /// Load the profile, if one has been saved
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    async fn get(&self) -> AppResult<Option<UserProfile>>;

    /// Persist the profile
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn save(&self, profile: &UserProfile) -> AppResult<()>;
}
