//! A recipe schema with typed projection and validation.
//!
//! Run with: cargo run --example custom_recipe

use easy_markup::typed::{ensure_range, require, validate};
use easy_markup::{
    from_str, symbols, CollectionProperty, FromCollection, Property, ScalarType, Schema,
    ValidationError,
};
use std::error::Error;

symbols! {
    /// Items a recipe can refer to.
    pub enum TechType {
        Titanium,
        Copper,
        Quartz,
        Glass,
        Lubricant,
        Silicone = "SiliconeRubber",
    }
}

#[derive(Debug)]
struct Ingredient {
    item_id: TechType,
    required: i16,
}

impl FromCollection for Ingredient {
    const KEY: &'static str = "Ingredient";

    fn schema() -> Schema {
        Schema::new([
            Property::typed::<TechType>("ItemID").required(),
            Property::typed::<i16>("Required"),
        ])
    }

    fn from_collection(c: &CollectionProperty) -> Result<Self, ValidationError> {
        Ok(Ingredient {
            item_id: require(c, "ItemID")?,
            required: c.value("Required").unwrap_or(1),
        })
    }
}

#[derive(Debug)]
struct CustomRecipe {
    item_id: TechType,
    amount_crafted: i16,
    ingredients: Vec<Ingredient>,
    linked_items: Vec<TechType>,
}

impl FromCollection for CustomRecipe {
    const KEY: &'static str = "CustomRecipe";

    fn schema() -> Schema {
        Schema::new([
            Property::typed::<TechType>("ItemID"),
            Property::typed::<i16>("AmountCrafted"),
            Property::collection_list("Ingredients", Ingredient::KEY, &Ingredient::schema()),
            Property::scalar_list("LinkedItemIDs", TechType::kind()),
        ])
        .on_extracted(validate::<CustomRecipe>)
    }

    fn from_collection(c: &CollectionProperty) -> Result<Self, ValidationError> {
        let amount = c.value("AmountCrafted").unwrap_or(1);
        Ok(CustomRecipe {
            item_id: require(c, "ItemID")?,
            amount_crafted: ensure_range("AmountCrafted", amount, 1, 25)?,
            ingredients: match c.list("Ingredients") {
                Some(list) => list.project()?,
                None => Vec::new(),
            },
            linked_items: c
                .list("LinkedItemIDs")
                .map(|l| l.values())
                .unwrap_or_default(),
        })
    }
}

const RECIPES: &str = "
    # Recipes are checked while they are parsed #
    CustomRecipe:
    (
        ItemID: Lubricant;
        AmountCrafted: 3;
        Ingredients:
        (
            Ingredient: ( ItemID: SiliconeRubber; );,
            Ingredient: ( ItemID: Copper; Required: 2; );
        );
        LinkedItemIDs: ( Glass );
    );
";

fn main() -> Result<(), Box<dyn Error>> {
    let parsed = from_str(&CustomRecipe::prototype(), RECIPES)?;
    let recipe: CustomRecipe = parsed
        .as_collection()
        .ok_or("expected a collection")?
        .project()?;

    println!("Crafts {} x {}", recipe.amount_crafted, recipe.item_id);
    for ingredient in &recipe.ingredients {
        println!("  needs {} x {}", ingredient.required, ingredient.item_id);
    }
    println!("  unlocks {:?}", recipe.linked_items);

    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&parsed)?);

    // Out-of-range amounts are rejected by the schema's hook
    let too_many = "CustomRecipe:(ItemID:Titanium;AmountCrafted:40;);";
    match from_str(&CustomRecipe::prototype(), too_many) {
        Ok(_) => println!("\nUnexpectedly accepted {}", too_many),
        Err(e) => println!("\nRejected: {}", e),
    }

    Ok(())
}
