//! Page JSON import/export tests

use pagecraft_editor::{
    denormalize, denormalize_forest, normalize, normalize_forest, normalize_value, IdGenerator, PageNode,
};
use serde_json::{json, Value};

fn ids() -> IdGenerator {
    IdGenerator::new("home")
}

fn round_trip(value: &Value) -> Value {
    denormalize(&normalize_value(value, &mut ids())).to_value()
}

#[test]
fn test_round_trip_canonical_nodes() {
    let samples = vec![
        json!({ "tag": "div" }),
        json!({ "tag": "h1", "content": "Welcome", "style": { "font": "font-bold", "text": "text-3xl" } }),
        json!({ "tag": "img", "src": "/hero.png", "props": { "alt": "Hero" } }),
        json!({ "tag": "button", "content": "Add to cart", "events": { "click": "addToCart" } }),
        json!({ "tag": "a", "content": "Docs", "props": { "href": "/docs", "target": "_blank" } }),
        json!({ "id": "hero", "tag": "section" }),
        json!({
            "tag": "section",
            "style": { "padding": "p-8", "display": "flex" },
            "children": [
                { "tag": "h2", "content": "Products" },
                {
                    "tag": "div",
                    "style": { "grid": "grid-cols-3" },
                    "children": [
                        { "tag": "img", "src": "/a.png" },
                        { "tag": "p", "content": "A", "props": { "data-sku": "a-1" } },
                        { "tag": "button", "content": "Buy", "events": { "click": "addToCart" } }
                    ]
                }
            ]
        }),
    ];

    for sample in samples {
        assert_eq!(round_trip(&sample), sample);
    }
}

#[test]
fn test_round_trip_canonicalizes_alternate_spellings() {
    let input = json!({
        "type": "section",
        "styles": { "padding": "p-4" },
        "props": {
            "children": [
                { "type": "p", "props": { "text": "from props" } }
            ]
        }
    });

    assert_eq!(
        round_trip(&input),
        json!({
            "tag": "section",
            "style": { "padding": "p-4" },
            "children": [{ "tag": "p", "content": "from props" }]
        })
    );
}

#[test]
fn test_round_trip_drops_empty_containers() {
    let input = json!({ "tag": "div", "style": {}, "props": {}, "children": [] });
    assert_eq!(round_trip(&input), json!({ "tag": "div" }));
}

#[test]
fn test_malformed_nodes_recover() {
    let mut ids = ids();
    let components = vec![
        json!(null),
        json!({ "children": 5 }),
        json!({ "tag": "ul", "children": [1, { "tag": "li" }] }),
        json!({ "tag": "p", "style": "p-4" }),
    ];

    let forest = normalize_forest(&components, &mut ids);

    assert_eq!(forest.len(), 4);
    assert_eq!(forest.roots()[0].kind, "div");
    assert!(forest.roots()[1].children.is_empty());
    assert_eq!(forest.roots()[2].children.len(), 2);
    assert_eq!(forest.roots()[2].children[0].kind, "div");
    assert_eq!(forest.roots()[2].children[1].kind, "li");
    assert!(forest.roots()[3].styles.is_empty());
}

#[test]
fn test_identities_are_unique_across_a_page() {
    let mut ids = ids();
    let components = vec![
        json!({ "tag": "div", "children": [{ "tag": "p" }, { "tag": "p" }] }),
        json!({ "tag": "div", "children": [{ "tag": "p" }] }),
    ];

    let forest = normalize_forest(&components, &mut ids);
    let mut identities = forest.identities();
    let total = identities.len();
    identities.sort();
    identities.dedup();

    assert_eq!(total, 5);
    assert_eq!(identities.len(), 5);
}

#[test]
fn test_normalize_is_not_identity_stable() {
    // identities differ between calls, everything else matches
    let input = json!({ "tag": "div", "children": [{ "tag": "p", "content": "x" }] });
    let mut ids = ids();

    let first = normalize_value(&input, &mut ids);
    let second = normalize_value(&input, &mut ids);

    assert_ne!(first.id, second.id);
    assert_ne!(first, second);
    assert_eq!(denormalize(&first), denormalize(&second));
}

#[test]
fn test_typed_page_node_round_trip() {
    let node = PageNode {
        tag: "nav".to_string(),
        children: vec![
            PageNode {
                content: Some(json!("Home")),
                props: serde_json::from_value(json!({ "href": "#/home" })).unwrap(),
                ..PageNode::new("a")
            },
            PageNode::new("hr"),
        ],
        ..PageNode::default()
    };

    let normalized = normalize(&node, &mut ids());
    assert_eq!(normalized.children.len(), 2);
    assert_eq!(normalized.children[0].text(), Some("Home"));

    assert_eq!(denormalize(&normalized), node);
}

#[test]
fn test_denormalize_forest_keeps_root_order() {
    let mut ids = ids();
    let components = vec![json!({ "tag": "header" }), json!({ "tag": "main" }), json!({ "tag": "footer" })];

    let forest = normalize_forest(&components, &mut ids);
    let exported: Vec<Value> = denormalize_forest(&forest).iter().map(PageNode::to_value).collect();

    assert_eq!(exported, components);
}
