//! Concurrent history retrieval for a system's parameters.
//!
//! One task per parameter is run on the rayon pool and joined before
//! returning. Each task yields its own [`ParamHistory`]; a failed fetch
//! becomes an empty series tagged [`FetchStatus::Failed`].

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use sv_config::StandConfig;
use sv_core::Timestamp;
use sv_series::{OutlierFilter, Signal};

use crate::error::{AppError, AppResult};
use crate::source::{HistoryQuery, HistorySource};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum FetchStatus {
    Ok,
    Failed(String),
}

/// Cleaned history of one display parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamHistory {
    pub param: String,
    pub series: Signal,
    pub status: FetchStatus,
}

impl ParamHistory {
    fn failed(param: &str, reason: String) -> Self {
        Self {
            param: param.to_string(),
            series: Signal::default(),
            status: FetchStatus::Failed(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FetchStatus::Ok
    }
}

/// Fetch the history parameters of `system` since `from`.
#[tracing::instrument(skip(source, config))]
pub fn fetch_history<S>(
    source: &S,
    config: &StandConfig,
    system: &str,
    from: Timestamp,
) -> AppResult<BTreeMap<String, ParamHistory>>
where
    S: HistorySource + ?Sized,
{
    let def = config
        .system(system)
        .ok_or_else(|| AppError::SystemNotFound(system.to_string()))?;
    let filter = config.outlier_filter();
    let service_path = StandConfig::service_path(system);

    let histories: Vec<ParamHistory> = def
        .history_parameters
        .par_iter()
        .map(|param| {
            let Some(loc) = def.parameters.get(param) else {
                return ParamHistory::failed(param, "parameter has no broker location".to_string());
            };
            let query = HistoryQuery {
                service_path: service_path.clone(),
                entity_id: loc.entity.clone(),
                attribute: loc.attribute.clone(),
                from,
            };
            fetch_one(source, &filter, param, &query)
        })
        .collect();

    let failed = histories.iter().filter(|h| !h.is_ok()).count();
    if failed > 0 {
        tracing::warn!(failed, total = histories.len(), "some history queries failed");
    }

    Ok(histories
        .into_iter()
        .map(|h| (h.param.clone(), h))
        .collect())
}

fn fetch_one<S>(source: &S, filter: &OutlierFilter, param: &str, query: &HistoryQuery) -> ParamHistory
where
    S: HistorySource + ?Sized,
{
    match source.fetch(query) {
        Ok(raw) => ParamHistory {
            param: param.to_string(),
            series: filter.apply(param, &raw),
            status: FetchStatus::Ok,
        },
        Err(err) => {
            tracing::warn!(param = %param, entity = %query.entity_id, %err, "history query failed");
            ParamHistory::failed(param, err.to_string())
        }
    }
}
