// ABOUTME: Shared test fixtures: scripted in-memory implementations of the stores
// ABOUTME: Plus small builders for products, recipes, and profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::similar_names
)]

use async_trait::async_trait;
use futures_util::stream;
use mealtrack_core::errors::{AppError, AppResult};
use mealtrack_core::logging::LoggingConfig;
use mealtrack_core::models::{
    FoodItem, FoodProduct, Ingredient, Meal, MealFoodItem, Recipe, ServingSizeUnit, UserProfile,
    Visibility,
};
use mealtrack_core::sources::{
    BatchStream, FoodCatalogSource, ListStream, MealStore, RecipeStore, UserProfileStore,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

/// Install a quiet subscriber once so traced code paths run in tests
pub fn init_tracing() {
    let _ = LoggingConfig::default().init();
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn product(id: &str, name: &str, calories: f64) -> FoodProduct {
    FoodProduct::new(id, name, calories, calories / 10.0, calories / 20.0, calories / 40.0)
}

pub fn recipe(id: &str, name: &str) -> Recipe {
    Recipe {
        id: id.to_owned(),
        name: name.to_owned(),
        calories_per_100: 150.0,
        carbs_per_100: 20.0,
        protein_per_100: 8.0,
        fat_per_100: 4.0,
        servings: 1.0,
        serving_size_unit: ServingSizeUnit::HundredGrams,
        ingredients: Vec::new(),
        description: String::new(),
        visibility: Visibility::Owned,
    }
}

pub fn food_item(id: &str, name: &str, calories: f64) -> FoodItem {
    FoodItem::Product(product(id, name, calories))
}

// ============================================================================
// SCRIPTED CATALOG SOURCE
// ============================================================================

/// Catalog mock: each `search` call pops one pre-scripted batch sequence;
/// `get_by_id` serves from an in-memory map and counts lookups.
#[derive(Default)]
pub struct ScriptedCatalog {
    scripts: Mutex<VecDeque<Vec<AppResult<Vec<FoodProduct>>>>>,
    products: Mutex<HashMap<String, FoodProduct>>,
    pub lookups: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_script(&self, batches: Vec<AppResult<Vec<FoodProduct>>>) {
        self.scripts.lock().unwrap().push_back(batches);
    }

    pub fn insert_product(&self, p: FoodProduct) {
        self.products.lock().unwrap().insert(p.id.clone(), p);
    }
}

#[async_trait]
impl FoodCatalogSource for ScriptedCatalog {
    async fn search(&self, _query: &str, _language: &str) -> BatchStream<FoodProduct> {
        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Box::pin(stream::iter(script))
    }

    async fn get_by_id(&self, id: &str) -> AppResult<FoodProduct> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.products
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Food product").with_resource_id(id))
    }
}

// ============================================================================
// SCRIPTED RECIPE STORE
// ============================================================================

/// Recipe store mock with scripted search batches, a watch-backed owned
/// list, and recorded ingredient saves.
pub struct ScriptedRecipeStore {
    scripts: Mutex<VecDeque<Vec<AppResult<Vec<Recipe>>>>>,
    recipes: Mutex<HashMap<String, Recipe>>,
    owned_tx: watch::Sender<Vec<Recipe>>,
    pub saved_ingredients: Mutex<Vec<Ingredient>>,
}

impl Default for ScriptedRecipeStore {
    fn default() -> Self {
        let (owned_tx, _rx) = watch::channel(Vec::new());
        Self {
            scripts: Mutex::new(VecDeque::new()),
            recipes: Mutex::new(HashMap::new()),
            owned_tx,
            saved_ingredients: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_script(&self, batches: Vec<AppResult<Vec<Recipe>>>) {
        self.scripts.lock().unwrap().push_back(batches);
    }

    pub fn insert_recipe(&self, r: Recipe) {
        self.recipes.lock().unwrap().insert(r.id.clone(), r);
    }

    /// Replace the owned-recipes list; live observers see the new value
    pub fn set_owned(&self, list: Vec<Recipe>) {
        self.owned_tx.send_replace(list);
    }
}

#[async_trait]
impl RecipeStore for ScriptedRecipeStore {
    async fn search(&self, _query: &str) -> BatchStream<Recipe> {
        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Box::pin(stream::iter(script))
    }

    async fn observe_owned(&self) -> ListStream<Recipe> {
        let mut rx = self.owned_tx.subscribe();
        Box::pin(async_stream::stream! {
            loop {
                let current = rx.borrow_and_update().clone();
                yield current;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Recipe> {
        self.recipes
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Recipe").with_resource_id(id))
    }

    async fn get_ingredient(&self, recipe_id: &str, item_id: &str) -> AppResult<Ingredient> {
        let recipe = self.get_by_id(recipe_id).await?;
        recipe
            .ingredients
            .iter()
            .find(|i| i.item_id() == item_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Ingredient").with_resource_id(item_id))
    }

    async fn update(&self, recipe: &Recipe) -> AppResult<()> {
        self.recipes
            .lock()
            .unwrap()
            .insert(recipe.id.clone(), recipe.clone());
        Ok(())
    }

    async fn update_ingredient(&self, ingredient: &Ingredient) -> AppResult<()> {
        self.saved_ingredients.lock().unwrap().push(ingredient.clone());
        Ok(())
    }
}

// ============================================================================
// MOCK MEAL STORE
// ============================================================================

/// Meal store mock with call counters and a switch that makes writes fail
#[derive(Default)]
pub struct MockMealStore {
    pub meals: Mutex<HashMap<String, Meal>>,
    pub add_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl MockMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_meal(&self, meal: Meal) {
        self.meals.lock().unwrap().insert(meal.id.clone(), meal);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::storage("meal store write failed"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MealStore for MockMealStore {
    async fn get_by_id(&self, id: &str) -> AppResult<Meal> {
        self.meals
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Meal").with_resource_id(id))
    }

    async fn add(&self, meal: &Meal) -> AppResult<()> {
        self.check_writable()?;
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_meal(meal.clone());
        Ok(())
    }

    async fn update(&self, meal: &Meal) -> AppResult<()> {
        self.check_writable()?;
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_meal(meal.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.check_writable()?;
        self.meals
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Meal").with_resource_id(id))
    }

    async fn get_food_item(&self, meal_id: &str, item_id: &str) -> AppResult<MealFoodItem> {
        let meal = self.get_by_id(meal_id).await?;
        meal.food_items
            .iter()
            .find(|line| line.item_id() == item_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Meal line item").with_resource_id(item_id))
    }

    async fn update_food_item(&self, item: &MealFoodItem) -> AppResult<()> {
        self.check_writable()?;
        let mut meals = self.meals.lock().unwrap();
        let meal = meals
            .get_mut(&item.meal_id)
            .ok_or_else(|| AppError::not_found("Meal").with_resource_id(&item.meal_id))?;
        match meal
            .food_items
            .iter_mut()
            .find(|line| line.item_id() == item.item_id())
        {
            Some(line) => {
                *line = item.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Meal line item").with_resource_id(item.item_id())),
        }
    }
}

// ============================================================================
// IN-MEMORY PROFILE STORE
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileStore {
    profile: Mutex<Option<UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProfileStore for InMemoryProfileStore {
    async fn get(&self) -> AppResult<Option<UserProfile>> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(())
    }
}
