use ignis_core::{Classification, PartnerRecord};
use ignis_render::{
    DrawSurface, Element, NetworkOptions, PointerEvent, Shape, SvgSurface, render_network,
};

fn partners() -> Vec<PartnerRecord> {
    vec![
        PartnerRecord::new("CNPJ_00017", 120.0).with_classification(Classification::Critical),
        PartnerRecord::new("CNPJ_00042", 40.0).with_classification(Classification::Important),
        PartnerRecord::new("CNPJ_00077", 0.0),
    ]
}

fn circles(svg: &SvgSurface) -> Vec<(&str, f64, &str)> {
    svg.elements()
        .iter()
        .filter_map(|e| match e {
            Element::Shape {
                shape: Shape::Circle { radius, .. },
                style,
            } => Some((
                style.key.as_deref().unwrap_or_default(),
                *radius,
                style.fill.as_deref().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

fn settle<S: DrawSurface>(view: &mut ignis_render::NetworkView<S>) {
    for _ in 0..400 {
        if !view.tick() {
            return;
        }
    }
    panic!("network did not settle");
}

#[test]
fn empty_partner_list_gives_an_idle_blank_view() {
    let mut svg = SvgSurface::new(360.0, 260.0);
    let mut view = render_network(&mut svg, "CNPJ_00001", &[], &NetworkOptions::default());
    assert!(view.is_idle());
    assert!(!view.tick());
    assert!(view.surface().is_blank());
}

#[test]
fn first_frame_draws_links_nodes_and_labels() {
    let view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    let svg = view.surface();
    let lines = svg
        .elements()
        .iter()
        .filter(|e| matches!(e, Element::Shape { shape: Shape::Line { .. }, .. }))
        .count();
    assert_eq!(lines, 3);

    let nodes = circles(svg);
    assert_eq!(
        nodes,
        vec![
            ("CNPJ_00001", 14.0, "#2cc4c9"),
            ("CNPJ_00017", 16.0, "#ff4d4d"),
            ("CNPJ_00042", 12.0, "#ffae42"),
            ("CNPJ_00077", 10.0, "#999"),
        ]
    );

    let labels: Vec<&str> = svg.texts().map(|t| t.content.as_str()).collect();
    assert_eq!(labels, vec!["EMPRESA", "0017", "0042", "0077"]);
}

#[test]
fn layout_settles_inside_budget_with_finite_positions() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    settle(&mut view);
    assert!(view.is_settled());
    for (_, s) in view.positions().expect("positions").iter() {
        assert!(s.x.is_finite() && s.y.is_finite());
    }
    assert!(!view.tick());
}

#[test]
fn duplicate_partner_ids_are_drawn_once() {
    let mut list = partners();
    list.push(PartnerRecord::new("CNPJ_00017", 5.0));
    list.push(PartnerRecord::new("CNPJ_00001", 5.0));
    let view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &list,
        &NetworkOptions::default(),
    );
    assert_eq!(circles(view.surface()).len(), 4);
}

#[test]
fn disposed_view_stops_updating() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    view.tick();
    let before = view.position("CNPJ_00017").expect("position");
    view.dispose();
    assert!(view.surface().is_blank());
    for _ in 0..10 {
        assert!(!view.tick());
    }
    assert_eq!(view.position("CNPJ_00017"), Some(before));
    assert!(view.surface().is_blank());
}

#[test]
fn dropping_the_view_clears_a_borrowed_surface() {
    let mut svg = SvgSurface::new(360.0, 260.0);
    {
        let mut view = render_network(&mut svg, "CNPJ_00001", &partners(), &NetworkOptions::default());
        view.tick();
    }
    assert!(svg.is_blank());
}

#[test]
fn dragging_pins_then_releases_a_node() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    settle(&mut view);

    let start = view.position("CNPJ_00042").expect("position");
    let surface = view.surface_mut();
    surface.push_pointer_event(PointerEvent::down(start.x, start.y));
    surface.push_pointer_event(PointerEvent::moved(50.0, 60.0));
    assert!(view.tick());
    assert_eq!(view.dragging().map(|n| n.id.as_str()), Some("CNPJ_00042"));
    let p = view.position("CNPJ_00042").expect("position");
    assert_eq!((p.x, p.y), (50.0, 60.0));
    let state = view.positions().and_then(|t| t.get("CNPJ_00042")).expect("state");
    assert!(state.is_pinned());

    view.surface_mut().push_pointer_event(PointerEvent::up(50.0, 60.0));
    view.tick();
    assert!(view.dragging().is_none());
    let state = view.positions().and_then(|t| t.get("CNPJ_00042")).expect("state");
    assert!(!state.is_pinned());
    assert!(!view.is_settled());
}

#[test]
fn releasing_a_long_drag_keeps_the_layout_moving() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    settle(&mut view);

    let start = view.position("CNPJ_00017").expect("position");
    view.surface_mut()
        .push_pointer_event(PointerEvent::down(start.x, start.y));
    for _ in 0..400 {
        assert!(view.tick());
    }

    view.surface_mut()
        .push_pointer_event(PointerEvent::up(start.x, start.y));
    assert!(view.tick());
    assert!(view.dragging().is_none());
    assert!(view.tick());
    settle(&mut view);
    assert!(view.is_settled());
}

#[test]
fn pointer_down_on_empty_space_does_nothing() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    settle(&mut view);
    view.handle_pointer(PointerEvent::down(-500.0, -500.0));
    assert!(view.dragging().is_none());
    assert!(view.is_settled());
}

#[test]
fn hover_shows_and_leave_hides_the_tooltip() {
    let mut view = render_network(
        SvgSurface::new(360.0, 260.0),
        "CNPJ_00001",
        &partners(),
        &NetworkOptions::default(),
    );
    settle(&mut view);

    let p = view.position("CNPJ_00017").expect("position");
    view.surface_mut().push_pointer_event(PointerEvent::moved(p.x, p.y));
    view.tick();
    assert_eq!(view.hovered().map(|n| n.id.as_str()), Some("CNPJ_00017"));
    let texts: Vec<&str> = view.surface().texts().map(|t| t.content.as_str()).collect();
    assert!(texts.contains(&"CNPJ_00017"));
    assert!(texts.contains(&"Peso: 120"));
    assert!(texts.contains(&"Classificação: Crítico"));
    assert_eq!(view.surface().shapes_with_key("tooltip").count(), 1);

    view.surface_mut().push_pointer_event(PointerEvent::leave());
    view.tick();
    assert!(view.hovered().is_none());
    assert_eq!(view.surface().shapes_with_key("tooltip").count(), 0);
}

#[test]
fn options_follow_config() {
    let cfg = ignis_core::IgnisConfig::with_overrides(&serde_json::json!({
        "network": {"width": 500, "centralLabel": "ALVO", "maxIterations": 50}
    }));
    let options = NetworkOptions::from_config(&cfg);
    assert_eq!(options.width, 500.0);
    assert_eq!(options.max_iterations, 50);

    let view = render_network(SvgSurface::new(500.0, 260.0), "X", &partners(), &options);
    assert_eq!(view.surface().texts().next().map(|t| t.content.as_str()), Some("ALVO"));
}
