//! Document-level behaviour of the EasyMarkup format.

use easy_markup::{
    check_key, escape_special_characters, from_str, Error, Property, ScalarKind, Schema,
};

fn tree_prototype() -> Property {
    let node = Schema::new([
        Property::typed::<i32>("ItemID"),
        Property::typed::<i16>("Amount"),
    ]);
    let tree = Schema::new([
        Property::typed::<i32>("ItemID"),
        Property::typed::<i16>("Amount"),
        Property::collection_list("Children", "", &node),
    ]);
    Property::collection("", &tree)
}

#[test]
fn test_key_mismatch_policy() {
    let mut bar = Property::scalar("bar", ScalarKind::Int32);
    assert!(matches!(
        bar.parse("foo:1;", true),
        Err(Error::KeyMismatch { .. })
    ));
    assert!(bar.parse("foo:1;", false).unwrap());
    assert_eq!(bar.key(), "bar");
    assert_eq!(bar.as_scalar().unwrap().get::<i32>(), Some(1));
}

#[test]
fn test_scalar_conversion() {
    let mut count = Property::scalar("Count", ScalarKind::Int32);
    count.parse("Count:7;", false).unwrap();
    assert_eq!(count.as_scalar().unwrap().get::<i32>(), Some(7));

    assert!(matches!(
        count.parse("Count:seven;", false),
        Err(Error::TypeConversion { .. })
    ));
    assert_eq!(count.as_scalar().unwrap().get::<i32>(), Some(7));
}

#[test]
fn test_composite_nesting() {
    let parsed = from_str(
        &tree_prototype(),
        "R:(ItemID:42;Amount:3;Children:(C:(ItemID:1;Amount:1;);););",
    )
    .unwrap();
    let root = parsed.as_collection().unwrap();
    assert_eq!(root.key(), "R");
    assert_eq!(root.value::<i32>("ItemID"), Some(42));
    assert_eq!(root.value::<i16>("Amount"), Some(3));

    let children = root.list("Children").unwrap();
    assert_eq!(children.len(), 1);
    let child = children.collections().next().unwrap();
    assert_eq!(child.key(), "C");
    assert_eq!(child.value::<i32>("ItemID"), Some(1));
    assert_eq!(child.value::<i16>("Amount"), Some(1));
}

#[test]
fn test_empty_list() {
    let list = Property::scalar_list("L", ScalarKind::Int32);
    let parsed = from_str(&list, "L:();").unwrap();
    assert!(parsed.as_list().unwrap().is_empty());
    assert_eq!(parsed.to_string(), "L:();");
}

#[test]
fn test_whitespace_is_insignificant() {
    let compact = from_str(&tree_prototype(), "R:(ItemID:1;Amount:2;);").unwrap();
    let spaced = from_str(
        &tree_prototype(),
        "\r\n  R\t: (\n  ItemID : 1 ;\n\tAmount:2 ; ) ;\n",
    )
    .unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn test_literal_strings_keep_their_content() {
    let name = Property::typed::<String>("Name");
    let parsed = from_str(&name, "Name: \"  a: (b); #c# \\\"d\\\" \";").unwrap();
    assert_eq!(
        parsed.as_scalar().unwrap().get::<String>().as_deref(),
        Some("  a: (b); #c# \"d\" ")
    );
}

#[test]
fn test_quote_inside_value_is_a_syntax_error() {
    let name = Property::typed::<String>("Name");
    assert!(matches!(
        from_str(&name, "Name: Gold\"Ore\";"),
        Err(Error::Syntax { .. })
    ));
    let parsed = from_str(&name, "Name: Gold\\\"Ore;").unwrap();
    assert_eq!(
        parsed.as_scalar().unwrap().get::<String>().as_deref(),
        Some("Gold\"Ore")
    );
}

#[test]
fn test_unterminated_regions() {
    let name = Property::typed::<String>("Name");
    for raw in ["Name: x; # open", "Name: \"open;", "Name: x\\"] {
        assert!(
            matches!(from_str(&name, raw), Err(Error::BufferUnderflow { .. })),
            "{raw}"
        );
    }
}

#[test]
fn test_equality_ignores_formatting() {
    let a = from_str(&tree_prototype(), "R:(Amount:2;ItemID:1;);").unwrap();
    let b = from_str(&tree_prototype(), "R : ( ItemID:1; #x# Amount:2; );").unwrap();
    let c = from_str(&tree_prototype(), "S:(ItemID:1;Amount:2;);").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_check_key() {
    assert_eq!(
        check_key("#x# CustomRecipe : (ItemID:Glass;);").unwrap().as_deref(),
        Some("CustomRecipe")
    );
    assert_eq!(check_key("\"My Key\":1;").unwrap().as_deref(), Some("My Key"));
    assert_eq!(check_key("   ").unwrap(), None);
}

#[test]
fn test_escape_special_characters() {
    assert_eq!(escape_special_characters("plain"), "plain");
    assert_eq!(escape_special_characters("a;b"), "a\\;b");
    assert_eq!(escape_special_characters("\\"), "\\\\");
    assert_eq!(escape_special_characters("a b\\c"), "\"a b\\\\c\"");
}

#[test]
fn test_timestamps_and_bools() {
    let schema = Schema::new([
        Property::scalar("At", ScalarKind::Timestamp),
        Property::scalar("On", ScalarKind::Bool),
    ]);
    let parsed = from_str(
        &Property::collection("E", &schema),
        "E:(At:2024-03-01T12\\:30\\:00Z;On:False;);",
    )
    .unwrap();
    assert_eq!(parsed.to_string(), "E:(At:2024-03-01T12\\:30\\:00Z;On:false;);");
}
