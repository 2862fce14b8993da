use ignis_core::{CompanySnapshot, Prediction, RiskBand, normalize};
use serde_json::json;

#[test]
fn empty_response_yields_documented_defaults() {
    let s = normalize(&json!({}));
    assert_eq!(s, CompanySnapshot::default());
    assert_eq!(s.id, "");
    assert_eq!(s.legal_name, "-");
    assert_eq!(s.sector, "-");
    assert_eq!(s.profile, "-");
    assert_eq!(s.outstanding_value, 0.0);
    assert_eq!(s.provision_value, 0.0);
    assert_eq!(s.risk_band, RiskBand::Unknown);
    assert_eq!(s.credit_score, None);
    assert_eq!(s.provision_percent, "0%");
    assert_eq!(s.state_code, "");
    assert_eq!(s.fraud_alert, "");
    assert!(!s.is_loaded());
}

#[test]
fn non_object_responses_never_panic() {
    for v in [json!(null), json!([1, 2]), json!("x"), json!(3), json!({"ML1": []})] {
        assert_eq!(normalize(&v), CompanySnapshot::default());
    }
}

#[test]
fn nan_fraud_alert_is_empty() {
    let s = normalize(&json!({"ML1": {"alertas": "nan"}}));
    assert_eq!(s.fraud_alert, "");
    assert!(!s.has_fraud_alert());

    let s = normalize(&json!({"ML1": {"alertas": "Transações atípicas"}}));
    assert_eq!(s.fraud_alert, "Transações atípicas");
    assert!(s.has_fraud_alert());
}

#[test]
fn full_response_is_mapped() {
    let s = normalize(&json!({
        "ID": "CNPJ_00004",
        "ML1": {
            "razaoSocial": "Acme Ltda",
            "setor": "Varejo",
            "perfil_predito": "Expansao",
            "VL_CAR": 125000.5,
            "VL_PDD": 3200,
            "VL_SLDO": -50,
            "VL_FATU": 900000,
            "Faixa_risco": "Médio",
            "Score_cliente": 640,
            "Percentual_PDD": "2.5%",
            "Estado": "SP",
            "alertas": "nan"
        }
    }));
    assert_eq!(s.id, "CNPJ_00004");
    assert_eq!(s.legal_name, "Acme Ltda");
    assert_eq!(s.sector, "Varejo");
    assert_eq!(s.profile, "Expansao");
    assert_eq!(s.outstanding_value, 125000.5);
    assert_eq!(s.provision_value, 3200.0);
    assert_eq!(s.balance_value, -50.0);
    assert_eq!(s.revenue_value, 900000.0);
    assert_eq!(s.risk_band, RiskBand::Medium);
    assert_eq!(s.credit_score, Some(640.0));
    assert_eq!(s.provision_percent, "2.5%");
    assert_eq!(s.state_code, "SP");
    assert_eq!(s.fraud_alert, "");
}

#[test]
fn wrong_types_fall_back_to_defaults() {
    let s = normalize(&json!({
        "ID": 17,
        "ML1": {
            "razaoSocial": 5,
            "VL_CAR": "1000",
            "Score_cliente": "high",
            "Faixa_risco": "Extremo",
            "Estado": ["SP"],
            "Percentual_PDD": {"v": 1}
        }
    }));
    assert_eq!(s.id, "");
    assert_eq!(s.legal_name, "-");
    assert_eq!(s.outstanding_value, 0.0);
    assert_eq!(s.credit_score, None);
    assert_eq!(s.risk_band, RiskBand::Unknown);
    assert_eq!(s.state_code, "");
    assert_eq!(s.provision_percent, "0%");
}

#[test]
fn prediction_bundles_snapshot_and_network() {
    let p = Prediction::from_response(&json!({
        "ID": "X",
        "ML2": {
            "principais_parceiros": [{"cnpj": "P1", "peso": 10, "percentual": 55.5, "classificacao": "Importante"}],
            "volume_total": 1500.25
        }
    }));
    assert_eq!(p.snapshot.id, "X");
    assert_eq!(p.network.partners.len(), 1);
    assert_eq!(p.network.partners[0].percent_of_total, 55.5);
    assert_eq!(p.network.total_volume, 1500.25);
    assert!(p.network.payable.is_empty());

    let empty = Prediction::from_response(&json!({}));
    assert_eq!(empty, Prediction::default());
}
