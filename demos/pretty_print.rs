//! Laying out compact EasyMarkup with the pretty printer.
//!
//! Run with: cargo run --example pretty_print

use easy_markup::pretty_print;

fn main() {
    let compact = "CustomRecipe:(ItemID:Glass;#smelted from quartz#AmountCrafted:2;\
                   Ingredients:(Ingredient:(ItemID:Quartz;Required:2;););\
                   LinkedItemIDs:(\"Glass Shard\",Quartz););";

    let pretty = pretty_print(compact);
    println!("{}\n", pretty);

    // Printing pretty output again changes nothing
    assert_eq!(pretty_print(&pretty), pretty);
    println!("✓ Pretty printing is idempotent");
}
