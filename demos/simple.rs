//! Parsing and writing a small EasyMarkup document.
//!
//! Run with: cargo run --example simple

use easy_markup::{from_str, to_string, Property, ScalarKind, Schema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let schema = Schema::new([
        Property::typed::<String>("Name").required(),
        Property::typed::<u32>("Port"),
        Property::typed::<bool>("Debug"),
        Property::scalar_list("Hosts", ScalarKind::Text),
    ]);
    let prototype = Property::collection("Server", &schema);

    let text = "
        # development server #
        Server:
        (
            Name: \"local dev\";
            Port: 8080;
            Hosts: ( localhost, 127.0.0.1 );
        );
    ";

    let server = from_str(&prototype, text)?;
    let fields = server
        .as_collection()
        .ok_or("expected a collection")?;
    println!("Name:  {:?}", fields.value::<String>("Name"));
    println!("Port:  {:?}", fields.value::<u32>("Port"));
    println!("Debug: {:?}", fields.value::<bool>("Debug"));

    // Back to compact text
    let compact = to_string(&server);
    println!("\nCompact output:\n{}\n", compact);

    let server_back = from_str(&prototype, &compact)?;
    assert_eq!(server, server_back);
    println!("✓ Round-trip successful");

    Ok(())
}
