use canvas_intents::{
    CanvasGraph, ClickKind, GraphAccessor, Intent, NodeId, NodeObject, PointerEvent,
    SettingsController,
};
use egui::{Modifiers, Pos2};

fn sample_node() -> NodeObject {
    NodeObject::new("V4128", "person")
        .with_label("Alice")
        .with_href("/kb/concept/V4128")
        .with_explore("/kb/explore/V4128")
        .with_property("name", "Alice")
}

#[test]
fn test_serialize_deserialize_pointer_event() {
    let event = PointerEvent::tap(vec![NodeId::from("V1"), NodeId::from("V2")])
        .at(Pos2::new(12.5, -3.))
        .with_kind(ClickKind::Press)
        .with_modifiers(Modifiers::SHIFT);
    let json = serde_json::to_string(&event).expect("serialize event");

    let event2: PointerEvent = serde_json::from_str(&json).expect("deserialize event");
    assert_eq!(event2, event);
    assert!(event2.shift());
    assert_eq!(event2.kind, ClickKind::Press);
}

#[test]
fn test_serialize_deserialize_intent() {
    let intent = Intent::ShowNodePanel(sample_node());
    let json = serde_json::to_string(&intent).expect("serialize intent");
    assert!(json.starts_with(r#"{"show-node-panel":"#));

    let intent2: Intent = serde_json::from_str(&json).expect("deserialize intent");
    assert_eq!(intent2, intent);
}

#[test]
fn test_serialize_deserialize_graph() {
    let mut g = CanvasGraph::new();
    g.add_node(sample_node(), Pos2::new(1., 2.));
    g.add_node(NodeObject::new("V8", "company"), Pos2::new(30., 2.));
    g.add_edge(&NodeId::from("V4128"), &NodeId::from("V8"));
    g.lock_all();
    g.release_nodes(&[NodeId::from("V8")]);
    g.select_nodes(&[NodeId::from("V4128")]);

    let json = serde_json::to_string(&g).expect("serialize graph");
    let g2: CanvasGraph = serde_json::from_str(&json).expect("deserialize graph");

    assert_eq!(g2.node_count(), g.node_count());
    assert_eq!(g2.edge_count(), g.edge_count());
    assert_eq!(g2.node(&NodeId::from("V4128")), Some(sample_node()));
    assert_eq!(g2.selected_nodes(), g.selected_nodes());
    assert_eq!(g2.released_nodes(), vec![NodeId::from("V8")]);
    assert_eq!(
        g2.connected_nodes(&NodeId::from("V8")),
        vec![NodeId::from("V4128")]
    );
    assert_eq!(
        g2.node_state(&NodeId::from("V8")).map(|n| n.location()),
        Some(Pos2::new(30., 2.))
    );
}

#[test]
fn test_settings_roundtrip() {
    let s = SettingsController::new().with_inferred_relationship_type("derived-relation");
    let json = serde_json::to_string(&s).expect("serialize settings");
    let s2: SettingsController = serde_json::from_str(&json).expect("deserialize settings");
    assert_eq!(s2, s);
}
