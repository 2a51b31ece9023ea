//! Food recommendation model and list.
//!
//! # Responsibility
//! - Define the food record shown by the food flow panel.
//! - Keep the food list unique by case-insensitive name.
//!
//! # Invariants
//! - `FoodCategory` ordering is the stable render sort key.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dietary category, ordered the way the panel groups cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Protein,
    Grain,
    Snack,
    Drink,
}

impl Display for FoodCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Fruit => "fruit",
            Self::Vegetable => "vegetable",
            Self::Protein => "protein",
            Self::Grain => "grain",
            Self::Snack => "snack",
            Self::Drink => "drink",
        };
        write!(f, "{label}")
    }
}

/// Food list mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodListError {
    EmptyName,
    DuplicateFood(String),
    FoodNotFound(String),
}

impl Display for FoodListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "food name cannot be empty"),
            Self::DuplicateFood(name) => write!(f, "duplicate food: {name}"),
            Self::FoodNotFound(name) => write!(f, "food not found: {name}"),
        }
    }
}

impl Error for FoodListError {}

/// One recommended food with per-serving nutrition values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub category: FoodCategory,
    pub calories: u32,
    pub glycemic_index: u32,
    pub sugar_grams: u32,
}

impl Food {
    pub fn new(
        name: impl Into<String>,
        category: FoodCategory,
        calories: u32,
        glycemic_index: u32,
        sugar_grams: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            calories,
            glycemic_index,
            sugar_grams,
        }
    }

    pub fn is_same(&self, other: &Food) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

/// Unique-by-name food collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodList {
    foods: Vec<Food>,
}

impl FoodList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.foods
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
    }

    pub fn add(&mut self, food: Food) -> Result<(), FoodListError> {
        if food.name.trim().is_empty() {
            return Err(FoodListError::EmptyName);
        }
        if self.contains(&food.name) {
            return Err(FoodListError::DuplicateFood(food.name));
        }
        self.foods.push(food);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Food, FoodListError> {
        let position = self
            .foods
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| FoodListError::FoodNotFound(name.to_string()))?;
        Ok(self.foods.remove(position))
    }

    /// Foods sorted by the stable render key `(category, name)`.
    pub fn sorted_for_render(&self) -> Vec<&Food> {
        let mut sorted: Vec<&Food> = self.foods.iter().collect();
        sorted.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.to_ascii_lowercase().cmp(&b.name.to_ascii_lowercase()))
        });
        sorted
    }

    /// Checks collection invariants after deserialization.
    pub fn verify(&self) -> Result<(), String> {
        for (index, food) in self.foods.iter().enumerate() {
            if food.name.trim().is_empty() {
                return Err(format!("food at index {index} has an empty name"));
            }
            let duplicated = self.foods[..index]
                .iter()
                .any(|earlier| earlier.is_same(food));
            if duplicated {
                return Err(format!("duplicate food: {}", food.name));
            }
        }
        Ok(())
    }
}
