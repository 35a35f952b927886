// ABOUTME: User profile models with physical attributes and derived daily goals
// ABOUTME: Gender, four-level activity ordinal, and weight goal enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender used by the BMR formula
///
/// The formula distinguishes male from every other value; non-male genders
/// share the female constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Any other gender
    Diverse,
}

/// Physical activity level, ordered from least to most active
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// No sport at all
    Never,
    /// Sport once in a while
    Occasional,
    /// Sport most weeks
    Regular,
    /// Sport nearly every day
    Frequent,
}

/// Direction the user wants their weight to move
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    /// Lose weight (caloric deficit)
    Lose,
    /// Maintain weight
    Maintain,
    /// Gain weight (caloric surplus)
    Gain,
}

/// Daily calorie and macro targets derived from a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyGoals {
    /// Daily calorie target (kcal)
    pub calories: i32,
    /// Daily protein target (grams)
    pub protein_g: i32,
    /// Daily carbohydrate target (grams)
    pub carbs_g: i32,
    /// Daily fat target (grams)
    pub fats_g: i32,
}

/// A user's physical attributes and goals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Gender for the BMR formula
    pub gender: Gender,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Target weight in kilograms
    pub target_weight_kg: f64,
    /// Physical activity level
    pub activity_level: ActivityLevel,
    /// Weight goal
    pub weight_goal: WeightGoal,
    /// Derived daily targets, absent until goals are first computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<DailyGoals>,
}

impl UserProfile {
    /// Completed years of age on the given date
    #[must_use]
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let mut age = date.years_since(self.birthdate).unwrap_or(0);
        // years_since already accounts for month/day, but guard a future birthdate
        if self.birthdate > date {
            age = 0;
        }
        age
    }
}
