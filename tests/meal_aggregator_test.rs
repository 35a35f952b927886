// ABOUTME: Integration tests for meal aggregation, validation, and persistence
// ABOUTME: Covers new-meal totals, editing-mode append, and failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp,
    clippy::similar_names
)]

use chrono::NaiveDate;
use mealtrack_core::errors::ErrorCode;
use mealtrack_core::models::{DayTime, FoodItem, Meal, ServingSizeUnit};
use mealtrack_core::MealAggregator;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;
use common::{product, recipe, MockMealStore};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn aggregator() -> (MealAggregator, Arc<MockMealStore>) {
    common::init_tracing();
    let store = Arc::new(MockMealStore::new());
    let meal_store: Arc<dyn mealtrack_core::sources::MealStore> = Arc::<MockMealStore>::clone(&store);
    (MealAggregator::new(meal_store), store)
}

#[tokio::test]
async fn test_missing_day_time_is_a_validation_error() {
    let (aggregator, store) = aggregator();
    let selection = vec![FoodItem::Product(product("fp1", "Oats", 370.0))];

    let err = aggregator
        .submit(&selection, None, None, date())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(store.add_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_selection_is_a_validation_error() {
    let (aggregator, store) = aggregator();

    let err = aggregator
        .submit(&[], Some(DayTime::Lunch), None, date())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(store.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_new_meal_sums_nutrients_scaled_by_quantity() {
    let (aggregator, store) = aggregator();

    // 2 x 10 g of a 370-kcal-per-100 product: 20 g -> 74 kcal
    let mut oats = product("fp1", "Oats", 370.0);
    oats.servings = 2.0;
    oats.serving_size_unit = ServingSizeUnit::TenGrams;

    // 1 x 100 g of a 150-kcal-per-100 recipe -> 150 kcal
    let porridge = recipe("r1", "Porridge");

    let selection = vec![FoodItem::Product(oats), FoodItem::Recipe(porridge)];
    let meal = aggregator
        .submit(&selection, Some(DayTime::Breakfast), None, date())
        .await
        .unwrap();

    assert_eq!(meal.day_time, DayTime::Breakfast);
    assert_eq!(meal.date, date());
    assert_eq!(meal.food_items.len(), 1);
    assert_eq!(meal.recipe_items.len(), 1);
    assert!((meal.food_items[0].quantity - 20.0).abs() < f64::EPSILON);
    assert!((meal.calories - 224.0).abs() < 1e-9);

    assert_eq!(store.add_calls.load(Ordering::SeqCst), 1);
    assert!(store.meals.lock().unwrap().contains_key(&meal.id));
}

#[tokio::test]
async fn test_editing_mode_appends_line_items_without_replacing() {
    let (aggregator, store) = aggregator();
    let existing = Meal {
        id: "m1".to_owned(),
        date: date(),
        day_time: DayTime::Lunch,
        calories: 100.0,
        carbs: 10.0,
        protein: 5.0,
        fat: 2.0,
        food_items: vec![],
        recipe_items: vec![],
    };
    store.insert_meal(existing);

    let selection = vec![FoodItem::Product(product("fp2", "Milk", 64.0))];
    let meal = aggregator
        .submit(&selection, Some(DayTime::Dinner), Some("m1"), date())
        .await
        .unwrap();

    assert_eq!(meal.id, "m1");
    assert_eq!(meal.day_time, DayTime::Dinner);
    assert_eq!(meal.food_items.len(), 1);
    assert_eq!(meal.food_items[0].meal_id, "m1");
    // New line's contribution is added on top of the stored totals
    assert!((meal.calories - 164.0).abs() < 1e-9);

    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.add_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_editing_an_unknown_meal_is_not_found() {
    let (aggregator, _store) = aggregator();
    let selection = vec![FoodItem::Product(product("fp1", "Oats", 370.0))];

    let err = aggregator
        .submit(&selection, Some(DayTime::Snack), Some("missing"), date())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_persistence_failure_surfaces_as_storage_error() {
    let (aggregator, store) = aggregator();
    store.set_fail_writes(true);

    let selection = vec![FoodItem::Product(product("fp1", "Oats", 370.0))];
    let err = aggregator
        .submit(&selection, Some(DayTime::Breakfast), None, date())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::StorageError);
    assert!(store.meals.lock().unwrap().is_empty());
}
