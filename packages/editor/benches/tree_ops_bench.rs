use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{
    denormalize_forest, find_path_by_id, indent, normalize_forest, reorder, DropZone, Forest, IdGenerator, Node,
};
use serde_json::{json, Value};

/// `width` sections, each holding `width` cards of three leaves
fn wide_forest(width: usize) -> Forest {
    let sections = (0..width).map(|s| {
        Node::new(format!("section-{s}"), "section").with_children((0..width).map(|c| {
            Node::new(format!("card-{s}-{c}"), "div").with_children([
                Node::new(format!("img-{s}-{c}"), "img").with_attribute("src", "/a.png"),
                Node::new(format!("title-{s}-{c}"), "h3").with_attribute("text", "Card"),
                Node::new(format!("buy-{s}-{c}"), "button").with_attribute("text", "Buy"),
            ])
        }))
    });
    Forest::new(sections.collect())
}

fn page_components(width: usize) -> Vec<Value> {
    (0..width)
        .map(|_| {
            json!({
                "tag": "section",
                "style": { "padding": "p-8" },
                "children": (0..width).map(|_| json!({
                    "tag": "div",
                    "children": [
                        { "tag": "img", "src": "/a.png" },
                        { "tag": "h3", "content": "Card" },
                        { "tag": "button", "content": "Buy", "events": { "click": "addToCart" } }
                    ]
                })).collect::<Vec<_>>()
            })
        })
        .collect()
}

fn find_deepest_last(c: &mut Criterion) {
    let forest = wide_forest(20);

    c.bench_function("find_path_by_id_last_leaf", |b| {
        b.iter(|| find_path_by_id(black_box(&forest), black_box("buy-19-19")))
    });
}

fn reorder_across_sections(c: &mut Criterion) {
    let forest = wide_forest(20);

    c.bench_function("reorder_across_sections", |b| {
        b.iter(|| reorder(black_box(&forest), "card-0-0", "card-19-19", DropZone::After))
    });
}

fn indent_card(c: &mut Criterion) {
    let forest = wide_forest(20);

    c.bench_function("indent_card", |b| b.iter(|| indent(black_box(&forest), "card-10-10")));
}

fn normalize_page(c: &mut Criterion) {
    let components = page_components(10);

    c.bench_function("normalize_page", |b| {
        b.iter(|| {
            let mut ids = IdGenerator::new("home");
            normalize_forest(black_box(&components), &mut ids)
        })
    });
}

fn denormalize_page(c: &mut Criterion) {
    let mut ids = IdGenerator::new("home");
    let forest = normalize_forest(&page_components(10), &mut ids);

    c.bench_function("denormalize_page", |b| {
        b.iter(|| denormalize_forest(black_box(&forest)))
    });
}

criterion_group!(
    benches,
    find_deepest_last,
    reorder_across_sections,
    indent_card,
    normalize_page,
    denormalize_page
);
criterion_main!(benches);
