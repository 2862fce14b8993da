use futures::executor::block_on;
use ignis::{Applied, Error, PredictionSource, RiskBand, Session};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};

const VALID: &str = "11.222.333/0001-81";

struct FakeService {
    reply: std::result::Result<Value, u16>,
    calls: Cell<usize>,
    last_id: RefCell<Option<String>>,
}

impl FakeService {
    fn ok(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            calls: Cell::new(0),
            last_id: RefCell::new(None),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            calls: Cell::new(0),
            last_id: RefCell::new(None),
        }
    }
}

impl PredictionSource for FakeService {
    async fn fetch(&self, request_id: &str) -> ignis::Result<Value> {
        self.calls.set(self.calls.get() + 1);
        *self.last_id.borrow_mut() = Some(request_id.to_string());
        match &self.reply {
            Ok(v) => Ok(v.clone()),
            Err(status) => Err(Error::Status {
                url: "http://fake/predict".to_string(),
                status: *status,
            }),
        }
    }
}

fn response(id: &str, band: &str) -> Value {
    json!({
        "ID": id,
        "ML1": {"razaoSocial": "ACME LTDA", "Faixa_risco": band, "Estado": "SP", "VL_CAR": 1000.0},
        "ML2": {"principais_parceiros": [
            {"cnpj": "CNPJ_00017", "peso": 120.0, "classificacao": "Crítico"}
        ]}
    })
}

#[test]
fn successful_submit_replaces_the_snapshot() {
    let service = FakeService::ok(response("CNPJ_00001", "Alto"));
    let mut session = Session::new(true);
    let applied = block_on(session.submit(&service, &format!("  {VALID} "))).expect("submit");
    assert_eq!(applied, Applied::Current);
    assert_eq!(service.last_id.borrow().as_deref(), Some(VALID));
    assert_eq!(session.snapshot().id, "CNPJ_00001");
    assert_eq!(session.snapshot().risk_band, RiskBand::High);
    assert_eq!(session.network().partners.len(), 1);
    assert_eq!(session.generation(), 1);
}

#[test]
fn invalid_identifier_never_reaches_the_service() {
    let service = FakeService::ok(response("CNPJ_00001", "Alto"));
    let mut session = Session::new(true);
    for raw in ["11111111111111", "123", "", "11.222.333/0001-82"] {
        let err = block_on(session.submit(&service, raw)).expect_err("invalid");
        assert!(matches!(err, Error::InvalidIdentifier { .. }), "{raw}: {err}");
    }
    assert_eq!(service.calls.get(), 0);
    assert!(!session.snapshot().is_loaded());
}

#[test]
fn synthetic_ids_pass_when_validation_is_off() {
    let service = FakeService::ok(response("CNPJ_00004", "Baixo"));
    let cfg = ignis::IgnisConfig::with_overrides(&json!({"prediction": {"validateIdentifier": false}}));
    let mut session = Session::from_config(&cfg);
    block_on(session.submit(&service, " cnpj_00004")).expect("submit");
    assert_eq!(service.last_id.borrow().as_deref(), Some("CNPJ_00004"));

    let err = block_on(session.submit(&service, "   ")).expect_err("blank");
    assert!(matches!(err, Error::InvalidIdentifier { .. }));
}

#[test]
fn fetch_failure_resets_to_defaults() {
    let mut session = Session::new(true);
    block_on(session.submit(&FakeService::ok(response("CNPJ_00001", "Alto")), VALID))
        .expect("submit");
    assert!(session.snapshot().is_loaded());

    let err = block_on(session.submit(&FakeService::failing(503), VALID)).expect_err("failure");
    assert!(err.is_fetch_failure());
    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert_eq!(session.snapshot(), &ignis::CompanySnapshot::default());
    assert!(session.network().is_empty());
}

#[test]
fn late_results_are_discarded() {
    let mut session = Session::new(true);
    let older = session.begin(VALID).expect("ticket");
    let newer = session.begin(VALID).expect("ticket");
    assert!(newer.generation() > older.generation());

    let applied = session
        .complete(&newer, Ok(response("CNPJ_00002", "Médio")))
        .expect("apply");
    assert_eq!(applied, Applied::Current);

    let applied = session
        .complete(&older, Ok(response("CNPJ_00001", "Alto")))
        .expect("stale");
    assert_eq!(applied, Applied::Stale);
    assert_eq!(session.snapshot().id, "CNPJ_00002");

    // A stale failure must not wipe the fresh data either.
    let applied = session
        .complete(
            &older,
            Err(Error::Transport {
                url: "http://fake".to_string(),
                message: "timeout".to_string(),
            }),
        )
        .expect("stale");
    assert_eq!(applied, Applied::Stale);
    assert_eq!(session.snapshot().id, "CNPJ_00002");
}

#[test]
fn in_order_results_both_apply() {
    let mut session = Session::new(true);
    let first = session.begin(VALID).expect("ticket");
    let second = session.begin(VALID).expect("ticket");
    session
        .complete(&first, Ok(response("CNPJ_00001", "Alto")))
        .expect("apply");
    session
        .complete(&second, Ok(response("CNPJ_00002", "Baixo")))
        .expect("apply");
    assert_eq!(session.snapshot().id, "CNPJ_00002");
    assert_eq!(session.generation(), second.generation());
}
