use ignis_core::network::GraphInvariantError;
use ignis_core::{Classification, GraphLink, GraphModel, PartnerRecord};

fn partners() -> Vec<PartnerRecord> {
    vec![
        PartnerRecord::new("P-0001", 120.0).with_classification(Classification::Critical),
        PartnerRecord::new("P-0002", 0.0),
        PartnerRecord::new("P-0003", 40.0).with_classification(Classification::Secondary),
    ]
}

#[test]
fn star_graph_has_one_central_node_and_resolvable_links() {
    let g = GraphModel::build("C", &partners());
    assert_eq!(g.nodes.len(), 4);
    assert_eq!(g.links.len(), 3);
    assert_eq!(g.nodes.iter().filter(|n| n.is_central).count(), 1);
    for l in &g.links {
        assert!(g.node_index(&l.source_id).is_some());
        assert!(g.node_index(&l.target_id).is_some());
        assert!(l.source_id == "C" || l.target_id == "C");
    }
    g.validate().expect("valid");
    assert_eq!(g.nodes[2].weight, Some(0.0));
}

#[test]
fn empty_partner_list_yields_empty_model() {
    let g = GraphModel::build("C", &[]);
    assert!(g.is_empty());
    assert!(g.links.is_empty());
    g.validate().expect("empty is valid");
}

#[test]
fn colliding_partner_ids_are_dropped() {
    let mut list = partners();
    list.push(PartnerRecord::new("C", 10.0));
    list.push(PartnerRecord::new("P-0001", 99.0));
    let g = GraphModel::build("C", &list);
    assert_eq!(g.nodes.len(), 4);
    g.validate().expect("valid");
}

#[test]
fn validate_reports_broken_models() {
    let mut g = GraphModel::build("C", &partners());
    g.links.push(GraphLink {
        source_id: "C".to_string(),
        target_id: "ghost".to_string(),
        weight: 1.0,
    });
    assert!(matches!(
        g.validate(),
        Err(GraphInvariantError::MissingEndpoint { .. })
    ));

    let mut g = GraphModel::build("C", &partners());
    g.nodes[1].is_central = true;
    assert_eq!(
        g.validate(),
        Err(GraphInvariantError::CentralCount { count: 2 })
    );

    let mut g = GraphModel::build("C", &partners());
    g.links[0].source_id = "P-0003".to_string();
    assert!(matches!(
        g.validate(),
        Err(GraphInvariantError::DetachedLink { .. })
    ));
}
