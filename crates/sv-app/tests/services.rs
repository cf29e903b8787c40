use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};
use sv_app::*;
use sv_config::{BrokerStructure, StandConfig};
use sv_core::{SystemLabel, Timestamp};
use sv_series::{Sample, Signal};

fn t(s: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2021, 1, 2, 8, 0, 0).unwrap() + TimeDelta::seconds(s)
}

fn config() -> StandConfig {
    sv_config::reference().unwrap()
}

fn series(points: &[(i64, Option<f64>)]) -> Signal {
    points.iter().map(|(s, v)| Sample::new(t(*s), *v)).collect()
}

fn relay_dump(config: &StandConfig) -> HistoryDump {
    let mut dump = HistoryDump::default();
    let relays = &config.relays;
    dump.insert(
        &relays.entity_id,
        &relays.relay_a_attribute,
        series(&[(0, Some(0.0)), (60, Some(1.0)), (120, Some(0.0))]),
    );
    dump.insert(
        &relays.entity_id,
        &relays.relay_b_attribute,
        series(&[(0, Some(0.0)), (60, Some(0.0)), (120, Some(1.0))]),
    );
    dump
}

#[test]
fn switch_history_maps_periods_to_systems() {
    let config = config();
    let dump = relay_dump(&config);

    let history = switch_history(&dump, &config, t(0), t(180)).unwrap();
    let by_system = history.by_system();

    assert_eq!(by_system["plc"].starts, vec![t(0)]);
    assert_eq!(by_system["plc"].ends, vec![t(59)]);
    assert_eq!(by_system["lcgw"].starts, vec![t(60)]);
    assert_eq!(by_system["lcgw"].ends, vec![t(119)]);
    assert_eq!(by_system["ed"].starts, vec![t(120)]);
    assert_eq!(by_system["ed"].ends, vec![t(180)]);
}

#[test]
fn switch_history_respects_from() {
    let config = config();
    let dump = relay_dump(&config);

    let history = switch_history(&dump, &config, t(60), t(180)).unwrap();

    assert_eq!(history.periods.starts(SystemLabel::System1), &[t(60)]);
    assert!(history.periods.get(SystemLabel::System2).is_empty());
}

#[test]
fn missing_relay_series_gives_empty_periods() {
    let config = config();
    let mut dump = HistoryDump::default();
    dump.insert(
        &config.relays.entity_id,
        &config.relays.relay_a_attribute,
        series(&[(0, Some(1.0))]),
    );

    let history = switch_history(&dump, &config, t(0), t(10)).unwrap();
    assert!(history.periods.is_empty());
}

#[test]
fn history_fan_out_filters_each_parameter() {
    let config = config();
    let plc = config.system("plc").unwrap();
    let mut dump = HistoryDump::default();
    for param in &plc.history_parameters {
        let loc = &plc.parameters[param];
        dump.insert(
            &loc.entity,
            &loc.attribute,
            series(&[(0, Some(20.0)), (10, None), (20, Some(850.0)), (30, Some(45.0))]),
        );
    }

    let histories = fetch_history(&dump, &config, "plc", t(0)).unwrap();

    assert_eq!(histories.len(), plc.history_parameters.len());
    let temp = &histories["Air_Inlet_Temperature"];
    assert!(temp.is_ok());
    assert_eq!(temp.series.valid_values(), vec![20.0, 45.0]);
    // valve position has no bounds, only nulls go
    let valve = &histories["Three_Way_Valve"];
    assert_eq!(valve.series.valid_values(), vec![20.0, 850.0, 45.0]);
}

#[test]
fn history_fan_out_reports_failures_per_parameter() {
    let config = config();
    let plc = config.system("plc").unwrap();
    let loc = &plc.parameters["Supply_Temperature"];
    let mut dump = HistoryDump::default();
    dump.insert(&loc.entity, &loc.attribute, series(&[(0, Some(55.0))]));

    let histories = fetch_history(&dump, &config, "plc", t(0)).unwrap();

    assert!(histories["Supply_Temperature"].is_ok());
    let failed = &histories["Air_Inlet_Humidity"];
    assert!(matches!(failed.status, FetchStatus::Failed(_)));
    assert!(failed.series.is_empty());
}

#[test]
fn history_for_unknown_system_is_an_error() {
    let config = config();
    let result = fetch_history(&HistoryDump::default(), &config, "hvac", t(0));
    assert!(matches!(result, Err(AppError::SystemNotFound(_))));
}

struct CountingHistory {
    calls: AtomicUsize,
}

impl HistorySource for CountingHistory {
    fn fetch(&self, _query: &HistoryQuery) -> Result<Signal, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Signal::default())
    }
}

#[test]
fn one_query_per_history_parameter() {
    let config = config();
    let source = CountingHistory {
        calls: AtomicUsize::new(0),
    };
    fetch_history(&source, &config, "lcgw", t(0)).unwrap();
    assert_eq!(
        source.calls.load(Ordering::SeqCst),
        config.system("lcgw").unwrap().history_parameters.len()
    );
}

struct FakeBroker {
    listing: Result<Vec<Value>, SourceError>,
    relays: Result<Value, SourceError>,
}

impl EntitySource for FakeBroker {
    fn list_entities(&self, _service_path: &str) -> Result<Vec<Value>, SourceError> {
        self.listing.clone()
    }

    fn entity_attributes(
        &self,
        _entity_id: &str,
        _entity_type: &str,
        _service_path: &str,
    ) -> Result<Value, SourceError> {
        self.relays.clone()
    }
}

fn relay_attrs(r1: f64, r2: f64) -> Value {
    json!({
        "current_State_Relais1": {"type": "Number", "value": r1},
        "current_State_Relais2": {"type": "Number", "value": r2},
        "current_State_Relais3": {"type": "Number", "value": 0},
        "current_State_Relais4": {"type": "Number", "value": 1}
    })
}

#[test]
fn current_values_reads_listing() {
    let config = config();
    let mut structure = BrokerStructure::construct(&config);
    let broker = FakeBroker {
        listing: Ok(vec![json!({
            "id": "actuator:Three_Way_Valve_LCGW",
            "current_State": 37.46
        })]),
        relays: Ok(relay_attrs(1.0, 0.0)),
    };

    let values = current_values(&broker, &mut structure, &config, "lcgw").unwrap();

    assert_eq!(values["Three_Way_Valve"], 37.5);
    assert_eq!(values["Supply_Temperature"], -99.0);
}

#[test]
fn current_values_fall_back_to_nulls() {
    let config = config();
    let mut structure = BrokerStructure::construct(&config);
    let broker = FakeBroker {
        listing: Err(SourceError::Unavailable("broker".to_string())),
        relays: Err(SourceError::Unauthorized),
    };

    let values = current_values(&broker, &mut structure, &config, "plc").unwrap();
    assert!(values.values().all(|v| *v == -99.0));

    let readout = relay_readout(&broker, &config);
    assert_eq!(readout.len(), 4);
    assert!(readout.values().all(|v| *v == -99.0));
    assert_eq!(active_system(&readout, &config), None);
}

#[test]
fn unknown_system_is_rejected_regardless_of_broker() {
    let config = config();
    let mut structure = BrokerStructure::construct(&config);
    for listing in [Ok(vec![]), Err(SourceError::Unavailable("broker".to_string()))] {
        let broker = FakeBroker {
            listing,
            relays: Ok(relay_attrs(0.0, 0.0)),
        };
        let result = current_values(&broker, &mut structure, &config, "hvac");
        assert!(matches!(result, Err(AppError::SystemNotFound(name)) if name == "hvac"));
    }
}

#[test]
fn relay_readout_selects_active_system() {
    let config = config();
    for (r1, r2, expected) in [
        (1.0, 0.0, SystemLabel::System1),
        (1.0, 1.0, SystemLabel::System1),
        (0.0, 0.0, SystemLabel::System2),
        (0.0, 1.0, SystemLabel::System3),
    ] {
        let broker = FakeBroker {
            listing: Ok(vec![]),
            relays: Ok(relay_attrs(r1, r2)),
        };
        let readout = relay_readout(&broker, &config);
        assert_eq!(readout["current_State_Relais1"], r1);
        assert_eq!(active_system(&readout, &config), Some(expected));
    }
}

#[test]
fn damaged_relay_entity_reports_nulls() {
    let config = config();
    let broker = FakeBroker {
        listing: Ok(vec![]),
        relays: Ok(json!({"current_State_Relais1": {"value": 1}})),
    };
    let readout = relay_readout(&broker, &config);
    let expected: BTreeMap<String, f64> = config
        .relays
        .readout_attributes
        .iter()
        .map(|a| (a.clone(), -99.0))
        .collect();
    assert_eq!(readout, expected);
}

#[test]
fn load_config_reports_missing_file() {
    let err = load_config(std::path::Path::new("/nonexistent/stand.yaml")).unwrap_err();
    assert!(matches!(err, AppError::FileRead { .. }));
}
