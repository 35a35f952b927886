// ABOUTME: Daily calorie and macro goal calculation from physical attributes
// ABOUTME: BMR via Mifflin-St Jeor, PAL multiplier, goal delta, macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Goal Calculator
//!
//! Derives daily calorie and macronutrient targets from a user's physical
//! attributes, activity level, and weight goal:
//!
//! - BMR (Mifflin-St Jeor 1990): `10*weight + 6.25*height - 5*age + 5` for
//!   men, `- 161` otherwise
//! - `daily_calories = round(BMR * PAL + goal_delta)`
//! - `protein = round(weight * 1.8)` g
//! - `fats = round(daily_calories * 0.25 / 9.3)` g
//! - `carbs = round((daily_calories - protein*4.1 - fats*9.3) / 4.1)` g
//!
//! These functions assume validated input; the onboarding flow below is the
//! validation gate in front of them.

use crate::config::{BmrConfig, GoalConfig, PalConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, DailyGoals, Gender, UserProfile, WeightGoal};
use chrono::NaiveDate;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
#[must_use]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Gender::Male => config.male_constant,
        Gender::Female | Gender::Diverse => config.female_constant,
    };

    config.weight_coef * weight_kg
        + config.height_coef * height_cm
        + config.age_coef * f64::from(age)
        + gender_constant
}

/// Physical activity level multiplier for the given level
#[must_use]
pub const fn pal_factor(level: ActivityLevel, config: &PalConfig) -> f64 {
    match level {
        ActivityLevel::Never => config.never,
        ActivityLevel::Occasional => config.occasional,
        ActivityLevel::Regular => config.regular,
        ActivityLevel::Frequent => config.frequent,
    }
}

/// Compute daily calorie and macro targets for a profile
///
/// `today` anchors the age calculation. Rounding is to the nearest integer,
/// half up.
#[must_use]
pub fn calculate_daily_goals(
    profile: &UserProfile,
    today: NaiveDate,
    config: &GoalConfig,
) -> DailyGoals {
    let age = profile.age_on(today);
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        age,
        profile.gender,
        &config.bmr,
    );
    let pal = pal_factor(profile.activity_level, &config.pal);

    let delta = match profile.weight_goal {
        WeightGoal::Lose => config.adjustment.lose_kcal,
        WeightGoal::Maintain => config.adjustment.maintain_kcal,
        WeightGoal::Gain => config.adjustment.gain_kcal,
    };

    let calories = (bmr * pal + delta).round();
    let protein_g = (profile.weight_kg * config.macros.protein_g_per_kg).round();
    let fats_g =
        (calories * config.macros.fat_share_of_calories / config.macros.fat_kcal_per_g).round();
    let carbs_g = ((calories
        - (protein_g * config.macros.protein_kcal_per_g
            + fats_g * config.macros.fat_kcal_per_g))
        / config.macros.carb_kcal_per_g)
        .round();

    DailyGoals {
        calories: calories as i32,
        protein_g: protein_g as i32,
        carbs_g: carbs_g as i32,
        fats_g: fats_g as i32,
    }
}

// ---------------------------------------------------------------------------
// Onboarding flow
// ---------------------------------------------------------------------------

/// Named steps of the profile onboarding sequence, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Collect the birthdate
    Birthdate,
    /// Collect the gender
    Gender,
    /// Collect height and current weight
    Body,
    /// Collect the target weight
    TargetWeight,
    /// Collect the activity level
    Activity,
    /// Collect the weight goal
    Goal,
    /// All inputs collected
    Done,
}

/// Input for exactly one onboarding step
#[derive(Debug, Clone, Copy)]
pub enum OnboardingInput {
    /// Birthdate step input
    Birthdate(NaiveDate),
    /// Gender step input
    Gender(Gender),
    /// Body step input
    Body {
        /// Height in centimeters
        height_cm: f64,
        /// Current weight in kilograms
        weight_kg: f64,
    },
    /// Target weight step input (kilograms)
    TargetWeight(f64),
    /// Activity level step input
    Activity(ActivityLevel),
    /// Weight goal step input
    Goal(WeightGoal),
}

/// Sequential onboarding state machine in front of the goal calculator
///
/// Each step has a single `advance` transition guarded by a pure validator;
/// only a fully valid profile reaches [`OnboardingStep::Done`] and can be
/// finished into a [`UserProfile`] with computed goals.
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    today: NaiveDate,
    birthdate: Option<NaiveDate>,
    gender: Option<Gender>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    target_weight_kg: Option<f64>,
    activity_level: Option<ActivityLevel>,
    weight_goal: Option<WeightGoal>,
}

impl OnboardingFlow {
    /// Start a fresh flow; `today` anchors birthdate validation and the age
    /// used for goal calculation
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            step: OnboardingStep::Birthdate,
            today,
            birthdate: None,
            gender: None,
            height_cm: None,
            weight_kg: None,
            target_weight_kg: None,
            activity_level: None,
            weight_goal: None,
        }
    }

    /// Current step
    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Apply the input for the current step and move to the next
    ///
    /// # Errors
    ///
    /// Returns a validation error if the input belongs to a different step
    /// or fails that step's validator; the flow stays on the current step.
    pub fn advance(&mut self, input: OnboardingInput) -> AppResult<OnboardingStep> {
        match (self.step, input) {
            (OnboardingStep::Birthdate, OnboardingInput::Birthdate(date)) => {
                validate_birthdate(date, self.today)?;
                self.birthdate = Some(date);
                self.step = OnboardingStep::Gender;
            }
            (OnboardingStep::Gender, OnboardingInput::Gender(gender)) => {
                self.gender = Some(gender);
                self.step = OnboardingStep::Body;
            }
            (
                OnboardingStep::Body,
                OnboardingInput::Body {
                    height_cm,
                    weight_kg,
                },
            ) => {
                validate_height(height_cm)?;
                validate_weight(weight_kg)?;
                self.height_cm = Some(height_cm);
                self.weight_kg = Some(weight_kg);
                self.step = OnboardingStep::TargetWeight;
            }
            (OnboardingStep::TargetWeight, OnboardingInput::TargetWeight(target)) => {
                validate_weight(target)?;
                self.target_weight_kg = Some(target);
                self.step = OnboardingStep::Activity;
            }
            (OnboardingStep::Activity, OnboardingInput::Activity(level)) => {
                self.activity_level = Some(level);
                self.step = OnboardingStep::Goal;
            }
            (OnboardingStep::Goal, OnboardingInput::Goal(goal)) => {
                self.weight_goal = Some(goal);
                self.step = OnboardingStep::Done;
            }
            (step, _) => {
                return Err(AppError::invalid_input(format!(
                    "input does not belong to onboarding step {step:?}"
                )));
            }
        }
        Ok(self.step)
    }

    /// Build the profile with computed daily goals
    ///
    /// # Errors
    ///
    /// Returns a validation error unless every step has been completed.
    pub fn finish(&self, config: &GoalConfig) -> AppResult<UserProfile> {
        if self.step != OnboardingStep::Done {
            return Err(AppError::invalid_input(format!(
                "onboarding is not complete, still at {:?}",
                self.step
            )));
        }

        let mut profile = UserProfile {
            birthdate: self
                .birthdate
                .ok_or_else(|| AppError::missing_field("birthdate"))?,
            gender: self.gender.ok_or_else(|| AppError::missing_field("gender"))?,
            height_cm: self
                .height_cm
                .ok_or_else(|| AppError::missing_field("height"))?,
            weight_kg: self
                .weight_kg
                .ok_or_else(|| AppError::missing_field("weight"))?,
            target_weight_kg: self
                .target_weight_kg
                .ok_or_else(|| AppError::missing_field("target weight"))?,
            activity_level: self
                .activity_level
                .ok_or_else(|| AppError::missing_field("activity level"))?,
            weight_goal: self
                .weight_goal
                .ok_or_else(|| AppError::missing_field("weight goal"))?,
            goals: None,
        };
        profile.goals = Some(calculate_daily_goals(&profile, self.today, config));
        Ok(profile)
    }
}

fn validate_birthdate(date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if date >= today {
        return Err(AppError::invalid_input("Birthdate must be in the past"));
    }
    Ok(())
}

fn validate_height(height_cm: f64) -> AppResult<()> {
    if !(50.0..=300.0).contains(&height_cm) {
        return Err(AppError::invalid_input(
            "Height must be between 50 and 300 cm",
        ));
    }
    Ok(())
}

fn validate_weight(weight_kg: f64) -> AppResult<()> {
    if !(20.0..=500.0).contains(&weight_kg) {
        return Err(AppError::invalid_input(
            "Weight must be between 20 and 500 kg",
        ));
    }
    Ok(())
}
