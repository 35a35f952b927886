// ABOUTME: Coefficient configuration for BMR, PAL, and macro goal formulas
// ABOUTME: Defaults implement Mifflin-St Jeor plus a four-level PAL table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Goal calculation configuration
//!
//! Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
//! resting energy expenditure. *American Journal of Clinical Nutrition*,
//! 51(2), 241-247.

use serde::{Deserialize, Serialize};

/// BMR formula coefficients (Mifflin-St Jeor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub weight_coef: f64,
    /// Height coefficient (6.25)
    pub height_coef: f64,
    /// Age coefficient (-5.0)
    pub age_coef: f64,
    /// Male constant (+5)
    pub male_constant: f64,
    /// Constant for every other gender (-161)
    pub female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

/// Physical activity level multipliers applied to BMR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalConfig {
    /// No sport at all: 1.3
    pub never: f64,
    /// Sport once in a while: 1.6
    pub occasional: f64,
    /// Sport most weeks: 1.9
    pub regular: f64,
    /// Sport nearly every day: 2.2
    pub frequent: f64,
}

impl Default for PalConfig {
    fn default() -> Self {
        Self {
            never: 1.3,
            occasional: 1.6,
            regular: 1.9,
            frequent: 2.2,
        }
    }
}

/// Calorie adjustment per weight goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Deficit for losing weight (kcal/day)
    pub lose_kcal: f64,
    /// Adjustment for maintaining weight (kcal/day)
    pub maintain_kcal: f64,
    /// Surplus for gaining weight (kcal/day)
    pub gain_kcal: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            lose_kcal: -500.0,
            maintain_kcal: 0.0,
            gain_kcal: 500.0,
        }
    }
}

/// Macronutrient split coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Daily protein per kilogram of body weight (1.8 g/kg)
    pub protein_g_per_kg: f64,
    /// Share of daily calories allotted to fat (0.25)
    pub fat_share_of_calories: f64,
    /// Energy density of fat (9.3 kcal/g)
    pub fat_kcal_per_g: f64,
    /// Energy density of protein (4.1 kcal/g)
    pub protein_kcal_per_g: f64,
    /// Energy density of carbohydrates (4.1 kcal/g)
    pub carb_kcal_per_g: f64,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            protein_g_per_kg: 1.8,
            fat_share_of_calories: 0.25,
            fat_kcal_per_g: 9.3,
            protein_kcal_per_g: 4.1,
            carb_kcal_per_g: 4.1,
        }
    }
}

/// Complete goal calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalConfig {
    /// BMR formula coefficients
    pub bmr: BmrConfig,
    /// Activity level multipliers
    pub pal: PalConfig,
    /// Calorie adjustment per weight goal
    pub adjustment: GoalAdjustmentConfig,
    /// Macronutrient split coefficients
    pub macros: MacroSplitConfig,
}
