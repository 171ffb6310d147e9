//! Customizing EasyMarkup with MarkupOptions.
//!
//! Run with: cargo run --example custom_options

use easy_markup::{
    from_str_with_options, to_string_pretty_with_options, LineEnding, MarkupOptions, Property,
    Schema,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let prototype = Property::collection(
        "Window",
        &Schema::new([
            Property::typed::<String>("Title"),
            Property::typed::<i32>("Width"),
            Property::typed::<i32>("Height"),
        ]),
    );
    let text = "Window:(Title:Main;Width:800;Height:600;);";
    let window = from_str_with_options(&prototype, text, &MarkupOptions::default())?;

    // Default layout: four spaces, LF
    println!("Default:");
    println!("{}\n", window.pretty_print());

    // Two-space indentation
    println!("Indent 2:");
    let narrow = MarkupOptions::new().with_indent(2);
    println!("{}\n", to_string_pretty_with_options(&window, &narrow));

    // CRLF for tools that expect Windows line endings
    let crlf = MarkupOptions::new().with_line_ending(LineEnding::CrLf);
    let windows = to_string_pretty_with_options(&window, &crlf);
    println!("CRLF output has {} line breaks\n", windows.matches("\r\n").count());

    // Strict key checking
    let strict = MarkupOptions::strict();
    match from_str_with_options(&prototype, "Dialog:(Title:About;);", &strict) {
        Ok(_) => println!("Unexpectedly accepted a Dialog"),
        Err(e) => println!("Strict parsing rejected the document: {}", e),
    }

    // Options can live in a host application's JSON config
    let loaded: MarkupOptions = serde_json::from_str(r#"{ "indent": 8 }"#)?;
    println!("\nLoaded from config: {:?}", loaded);

    Ok(())
}
