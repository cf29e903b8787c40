//! Relay switch history → control periods.

use std::collections::BTreeMap;

use serde::Serialize;
use sv_config::StandConfig;
use sv_core::{SystemLabel, Timestamp};
use sv_periods::{ControlPeriods, PeriodList, reconstruct};
use sv_series::Signal;

use crate::error::AppResult;
use crate::source::{HistoryQuery, HistorySource};

/// Reconstructed periods plus the system each label stands for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchHistory {
    pub periods: ControlPeriods,
    pub systems: BTreeMap<SystemLabel, String>,
}

impl SwitchHistory {
    /// Periods keyed by control system name.
    pub fn by_system(&self) -> BTreeMap<String, PeriodList> {
        self.periods.named(&self.systems)
    }
}

/// Fetch both relay histories since `from` and reconstruct control periods
/// up to `now`.
///
/// A failed fetch on either relay yields empty periods, matching the
/// reconstructor's own handling of unusable data.
#[tracing::instrument(skip(source, config))]
pub fn switch_history<S>(
    source: &S,
    config: &StandConfig,
    from: Timestamp,
    now: Timestamp,
) -> AppResult<SwitchHistory>
where
    S: HistorySource + ?Sized,
{
    let step = config.time_step()?;
    let relays = &config.relays;
    let query = |attribute: &str| HistoryQuery {
        service_path: relays.service_path.clone(),
        entity_id: relays.entity_id.clone(),
        attribute: attribute.to_string(),
        from,
    };
    let query_a = query(&relays.relay_a_attribute);
    let query_b = query(&relays.relay_b_attribute);

    let (relay_a, relay_b) = rayon::join(|| source.fetch(&query_a), || source.fetch(&query_b));

    let periods = match (relay_a, relay_b) {
        (Ok(a), Ok(b)) => reconstruct(&a, &b, now, step),
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(%err, "relay history unavailable");
            ControlPeriods::empty()
        }
    };

    Ok(SwitchHistory {
        periods,
        systems: relays.labels.clone(),
    })
}

/// Reconstruct from already-fetched relay series.
pub fn switch_history_from(
    config: &StandConfig,
    relay_a: &Signal,
    relay_b: &Signal,
    window_end: Timestamp,
) -> AppResult<SwitchHistory> {
    let step = config.time_step()?;
    Ok(SwitchHistory {
        periods: reconstruct(relay_a, relay_b, window_end, step),
        systems: config.relays.labels.clone(),
    })
}
