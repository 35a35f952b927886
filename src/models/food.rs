// ABOUTME: Food domain models for catalog products, user recipes, and ingredients
// ABOUTME: FoodItem sum type unifies both sources for search and selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use serde::{Deserialize, Serialize};

/// Named serving-size unit carrying a fixed gram amount
///
/// Nutrient profiles are stored per 100 g; the unit's gram amount scales
/// them to what was actually eaten.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServingSizeUnit {
    /// 1 g
    Gram,
    /// 10 g
    TenGrams,
    /// 100 g
    #[default]
    HundredGrams,
}

impl ServingSizeUnit {
    /// Gram amount this unit stands for
    #[must_use]
    pub const fn gram_amount(self) -> f64 {
        match self {
            Self::Gram => 1.0,
            Self::TenGrams => 10.0,
            Self::HundredGrams => 100.0,
        }
    }
}

/// Recipe visibility
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible only to its author
    #[default]
    Private,
    /// Published for everyone
    Public,
    /// Owned by the current user
    Owned,
}

/// A food product from the remote catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodProduct {
    /// Stable identity across a search session
    pub id: String,
    /// Product name
    pub name: String,
    /// Calories per 100 g
    pub calories_per_100: f64,
    /// Carbohydrates per 100 g (grams)
    pub carbs_per_100: f64,
    /// Protein per 100 g (grams)
    pub protein_per_100: f64,
    /// Fat per 100 g (grams)
    pub fat_per_100: f64,
    /// Number of servings selected
    pub servings: f64,
    /// Serving-size unit selected
    pub serving_size_unit: ServingSizeUnit,
}

impl FoodProduct {
    /// Create a product with default serving selection (1 x 100 g)
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        calories_per_100: f64,
        carbs_per_100: f64,
        protein_per_100: f64,
        fat_per_100: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calories_per_100,
            carbs_per_100,
            protein_per_100,
            fat_per_100,
            servings: 1.0,
            serving_size_unit: ServingSizeUnit::default(),
        }
    }

    /// Grams this selection amounts to
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.servings * self.serving_size_unit.gram_amount()
    }
}

/// An ingredient line inside a recipe
///
/// Belongs to exactly one recipe and carries its own serving selection,
/// independent of the recipe's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    /// Owning recipe id
    pub recipe_id: String,
    /// The referenced catalog product
    pub product: FoodProduct,
    /// Number of servings of the product
    pub servings: f64,
    /// Serving-size unit for the product
    pub serving_size_unit: ServingSizeUnit,
}

impl Ingredient {
    /// Id of the referenced product
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.product.id
    }
}

/// A user-authored recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Stable identity
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Calories per 100 g
    pub calories_per_100: f64,
    /// Carbohydrates per 100 g (grams)
    pub carbs_per_100: f64,
    /// Protein per 100 g (grams)
    pub protein_per_100: f64,
    /// Fat per 100 g (grams)
    pub fat_per_100: f64,
    /// Number of servings selected
    pub servings: f64,
    /// Serving-size unit selected
    pub serving_size_unit: ServingSizeUnit,
    /// Ordered ingredient lines
    pub ingredients: Vec<Ingredient>,
    /// Free-text description
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    /// Who may see this recipe
    pub visibility: Visibility,
}

impl Recipe {
    /// Grams this selection amounts to
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.servings * self.serving_size_unit.gram_amount()
    }
}

/// Either a catalog product or a user recipe, unified for search and selection
///
/// Two items with the same id are the same logical item; adding an id that is
/// already selected replaces the earlier entry instead of duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoodItem {
    /// Catalog food product
    Product(FoodProduct),
    /// User-authored recipe
    Recipe(Recipe),
}

impl FoodItem {
    /// Stable identity
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Product(p) => &p.id,
            Self::Recipe(r) => &r.id,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Product(p) => &p.name,
            Self::Recipe(r) => &r.name,
        }
    }

    /// Calories per 100 g
    #[must_use]
    pub fn calories_per_100(&self) -> f64 {
        match self {
            Self::Product(p) => p.calories_per_100,
            Self::Recipe(r) => r.calories_per_100,
        }
    }

    /// Carbohydrates per 100 g
    #[must_use]
    pub fn carbs_per_100(&self) -> f64 {
        match self {
            Self::Product(p) => p.carbs_per_100,
            Self::Recipe(r) => r.carbs_per_100,
        }
    }

    /// Protein per 100 g
    #[must_use]
    pub fn protein_per_100(&self) -> f64 {
        match self {
            Self::Product(p) => p.protein_per_100,
            Self::Recipe(r) => r.protein_per_100,
        }
    }

    /// Fat per 100 g
    #[must_use]
    pub fn fat_per_100(&self) -> f64 {
        match self {
            Self::Product(p) => p.fat_per_100,
            Self::Recipe(r) => r.fat_per_100,
        }
    }

    /// Current servings selection
    #[must_use]
    pub fn servings(&self) -> f64 {
        match self {
            Self::Product(p) => p.servings,
            Self::Recipe(r) => r.servings,
        }
    }

    /// Current serving-size unit selection
    #[must_use]
    pub fn serving_size_unit(&self) -> ServingSizeUnit {
        match self {
            Self::Product(p) => p.serving_size_unit,
            Self::Recipe(r) => r.serving_size_unit,
        }
    }

    /// Grams this selection amounts to
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.servings() * self.serving_size_unit().gram_amount()
    }
}

impl From<FoodProduct> for FoodItem {
    fn from(product: FoodProduct) -> Self {
        Self::Product(product)
    }
}

impl From<Recipe> for FoodItem {
    fn from(recipe: Recipe) -> Self {
        Self::Recipe(recipe)
    }
}
