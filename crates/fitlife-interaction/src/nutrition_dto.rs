//! Wire shapes of the nutrition-data endpoint.

use fitlife_core::nutrition::NutritionFacts;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Nutrient {
    pub label: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// Nutrient table keyed by the database's nutrient codes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NutrientTable {
    #[serde(rename = "ENERC_KCAL")]
    pub energy_kcal: Option<Nutrient>,
    #[serde(rename = "PROCNT")]
    pub protein: Option<Nutrient>,
    #[serde(rename = "FAT")]
    pub fat: Option<Nutrient>,
    #[serde(rename = "CHOCDF")]
    pub carbs: Option<Nutrient>,
    #[serde(rename = "FIBTG")]
    pub fiber: Option<Nutrient>,
}

impl NutrientTable {
    fn is_empty(&self) -> bool {
        [
            &self.energy_kcal,
            &self.protein,
            &self.fat,
            &self.carbs,
            &self.fiber,
        ]
        .iter()
        .all(|nutrient| quantity(nutrient).is_none())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParsedIngredient {
    pub nutrients: Option<NutrientTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    pub parsed: Option<Vec<ParsedIngredient>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionResponse {
    pub calories: Option<f64>,
    pub total_weight: Option<f64>,
    pub total_nutrients: Option<NutrientTable>,
    pub health_labels: Option<Vec<String>>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl NutritionResponse {
    /// Nutrients of the first parsed ingredient, else the totals.
    fn nutrients(self) -> Option<NutrientTable> {
        let parsed = self
            .ingredients
            .and_then(|ingredients| ingredients.into_iter().next())
            .and_then(|ingredient| ingredient.parsed)
            .and_then(|parsed| parsed.into_iter().next())
            .and_then(|parsed| parsed.nutrients);

        parsed
            .or(self.total_nutrients)
            .filter(|table| !table.is_empty())
    }

    /// `None` when the response carries no nutrient quantities.
    pub fn into_facts(self, food: &str) -> Option<NutritionFacts> {
        let table = self.nutrients()?;
        Some(NutritionFacts {
            food: food.to_string(),
            // Whole kilocalories, truncated.
            calories: quantity(&table.energy_kcal).unwrap_or(0.0).max(0.0) as u32,
            protein: quantity(&table.protein).unwrap_or(0.0),
            carbs: quantity(&table.carbs).unwrap_or(0.0),
            fat: quantity(&table.fat).unwrap_or(0.0),
            fiber: quantity(&table.fiber).unwrap_or(0.0),
        })
    }
}

fn quantity(nutrient: &Option<Nutrient>) -> Option<f64> {
    nutrient.as_ref().and_then(|n| n.quantity)
}
