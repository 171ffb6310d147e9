use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use easy_markup::{from_str, pretty_print, to_string, Property, ScalarKind, Schema};

fn part_schema() -> Schema {
    Schema::new([
        Property::typed::<String>("Name"),
        Property::typed::<u32>("Quantity"),
        Property::typed::<f64>("Price"),
    ])
}

fn catalog_prototype() -> Property {
    Property::collection(
        "Catalog",
        &Schema::new([
            Property::typed::<String>("Title"),
            Property::collection_list("Parts", "Part", &part_schema()),
            Property::scalar_list("Tags", ScalarKind::Text),
        ]),
    )
}

fn catalog_text(size: u32) -> String {
    let parts: Vec<String> = (0..size)
        .map(|i| {
            format!(
                "Part:(Name:\"Part {i}\";Quantity:{i};Price:{};);",
                9.99 + f64::from(i)
            )
        })
        .collect();
    format!(
        "Catalog:(Title:Spares;Parts:({});Tags:(bolts,nuts,\"spring washers\"););",
        parts.join(",")
    )
}

fn benchmark_parse_scalar(c: &mut Criterion) {
    let count = Property::scalar("Count", ScalarKind::Int32);

    c.bench_function("parse_scalar", |b| {
        b.iter(|| from_str(&count, black_box("Count: 42;")))
    });
}

fn benchmark_parse_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_catalog");
    let prototype = catalog_prototype();

    for size in [10, 50, 100, 500].iter() {
        let text = catalog_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(&prototype, black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_catalog");
    let prototype = catalog_prototype();

    for size in [10, 50, 100, 500].iter() {
        let parsed = from_str(&prototype, &catalog_text(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &parsed, |b, parsed| {
            b.iter(|| to_string(black_box(parsed)))
        });
    }
    group.finish();
}

fn benchmark_pretty_print(c: &mut Criterion) {
    let compact = catalog_text(100);
    let pretty = pretty_print(&compact);

    let mut group = c.benchmark_group("pretty_print");
    group.bench_function("from_compact", |b| {
        b.iter(|| pretty_print(black_box(&compact)))
    });
    group.bench_function("from_pretty", |b| b.iter(|| pretty_print(black_box(&pretty))));
    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_scalar,
    benchmark_parse_catalog,
    benchmark_serialize_catalog,
    benchmark_pretty_print
);
criterion_main!(benches);
