use ignis_core::charts::{RadarAxis, classification_counts, radar_metrics, top_by_weight};
use ignis_core::{Classification, CompanySnapshot, PartnerRecord, RiskBand};

#[test]
fn classification_counts_have_fixed_order_and_zero_fill() {
    let partners = vec![
        PartnerRecord::new("a", 1.0).with_classification(Classification::Important),
        PartnerRecord::new("b", 1.0).with_classification(Classification::Critical),
        PartnerRecord::new("c", 1.0).with_classification(Classification::Critical),
    ];
    let counts = classification_counts(&partners);
    let pairs: Vec<(Classification, usize)> =
        counts.iter().map(|c| (c.classification, c.count)).collect();
    assert_eq!(
        pairs,
        vec![
            (Classification::Critical, 2),
            (Classification::Important, 1),
            (Classification::Secondary, 0),
        ]
    );
}

#[test]
fn top_by_weight_sorts_descending_and_truncates() {
    let partners = vec![
        PartnerRecord::new("a", 50.0),
        PartnerRecord::new("b", 200.0),
        PartnerRecord::new("c", 10.0),
    ];
    let top = top_by_weight(&partners, 2);
    let ids: Vec<&str> = top.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn top_by_weight_keeps_input_order_for_ties() {
    let partners = vec![
        PartnerRecord::new("first", 5.0),
        PartnerRecord::new("heavy", 9.0),
        PartnerRecord::new("second", 5.0),
        PartnerRecord::new("third", 5.0),
    ];
    let ids: Vec<&str> = top_by_weight(&partners, 10)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["heavy", "first", "second", "third"]);
    assert!(top_by_weight(&partners, 0).is_empty());
}

#[test]
fn radar_metrics_cap_and_default() {
    let s = CompanySnapshot {
        outstanding_value: 250_000.0,
        provision_value: 4_500.0,
        credit_score: None,
        risk_band: RiskBand::High,
        ..CompanySnapshot::default()
    };
    let m = radar_metrics(&s);
    assert_eq!(m[0].axis, RadarAxis::Revenue);
    assert_eq!(m[0].value, 100.0);
    assert_eq!(m[1].value, 0.0);
    assert_eq!(m[2].value, 4.5);
    assert_eq!(m[3].value, 80.0);

    let medium = CompanySnapshot {
        risk_band: RiskBand::Medium,
        credit_score: Some(712.0),
        ..CompanySnapshot::default()
    };
    let m = radar_metrics(&medium);
    assert_eq!(m[1].value, 712.0);
    assert_eq!(m[3].value, 50.0);
    assert_eq!(radar_metrics(&CompanySnapshot::default())[3].value, 20.0);
}
