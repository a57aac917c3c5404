//! Fixture builders shared by the unit tests.

use crate::domain::{DishSnapshot, MealRecord, MealType, Nutrition};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

pub fn dish(name: &str, cuisine: &str, calories: i32) -> DishSnapshot {
    DishSnapshot {
        id: Uuid::new_v4(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        calories,
        nutrition: Nutrition::default(),
        ingredients: Vec::new(),
        prep_time: 20,
        difficulty: "easy".to_string(),
        image: String::new(),
    }
}

pub fn with_ingredients(mut dish: DishSnapshot, ingredients: &[&str]) -> DishSnapshot {
    dish.ingredients = ingredients.iter().map(|i| i.to_string()).collect();
    dish
}

pub fn with_nutrition(mut dish: DishSnapshot, protein: i32, carbs: i32, fat: i32) -> DishSnapshot {
    dish.nutrition = Nutrition {
        protein,
        carbs,
        fat,
        fiber: 5,
        sugar: 2,
        sodium: 400,
    };
    dish
}

pub fn meal(year: i32, month: u32, day: u32, meal_type: MealType, dish: &DishSnapshot) -> MealRecord {
    let hour = match meal_type {
        MealType::Breakfast => 8,
        MealType::Lunch => 13,
        MealType::Snack => 17,
        MealType::Dinner => 20,
    };
    MealRecord {
        meal_id: Uuid::new_v4(),
        date: Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap(),
        meal_type,
        dish: dish.clone(),
        notes: String::new(),
        rating: 0,
    }
}
