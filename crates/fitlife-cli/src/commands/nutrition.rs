use crate::context::AppContext;
use anyhow::{Context, Result, bail};
use fitlife_application::NutritionSearch;
use fitlife_interaction::HttpNutritionClient;
use std::sync::Arc;

pub async fn lookup(ctx: &AppContext, food: &str) -> Result<()> {
    let client = HttpNutritionClient::new(&ctx.config.nutrition).context(
        "Nutrition lookup needs nutrition.app_id and nutrition.app_key \
         (or FITLIFE_NUTRITION_APP_ID / FITLIFE_NUTRITION_APP_KEY)",
    )?;
    let search = NutritionSearch::new(Arc::new(client));

    match search.search(food).await {
        Ok(Some(facts)) => {
            println!("food:      {}", facts.food);
            println!("calories:  {} kcal", facts.calories);
            println!("protein:   {:.1} g", facts.protein);
            println!("carbs:     {:.1} g", facts.carbs);
            println!("fat:       {:.1} g", facts.fat);
            println!("fiber:     {:.1} g", facts.fiber);
            Ok(())
        }
        Ok(None) => bail!("enter a food to look up"),
        Err(failure) => bail!(failure),
    }
}
