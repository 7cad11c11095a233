use claim_rating::config::DataConfig;
use claim_rating::error::AppError;
use claim_rating::rating::{ConditionCatalog, RateTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Rate table from `--rates`, then `RATE_TABLE_PATH`, then the built-in schedule.
pub(crate) fn load_rates(
    data: &DataConfig,
    override_path: Option<&Path>,
) -> Result<RateTable, AppError> {
    match override_path.or(data.rate_table_path.as_deref()) {
        Some(path) => {
            let rates = RateTable::from_path(path)?;
            info!(path = %path.display(), schedule = %rates.schedule, "loaded rate table");
            Ok(rates)
        }
        None => Ok(RateTable::standard()),
    }
}

pub(crate) fn load_catalog(data: &DataConfig) -> Result<ConditionCatalog, AppError> {
    match data.condition_catalog_path.as_deref() {
        Some(path) => {
            let catalog = ConditionCatalog::from_path(path)?;
            info!(path = %path.display(), conditions = catalog.len(), "loaded condition catalog");
            Ok(catalog)
        }
        None => Ok(ConditionCatalog::standard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_built_in_data() {
        let data = DataConfig::default();

        let rates = load_rates(&data, None).expect("standard rates");
        let catalog = load_catalog(&data).expect("standard catalog");

        assert_eq!(rates, RateTable::standard());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn rejects_unsupported_rate_files() {
        let path = std::env::temp_dir().join("claim-rating-infra-rates.txt");
        std::fs::write(&path, "not a schedule").expect("write temp file");

        let result = load_rates(&DataConfig::default(), Some(&path));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(AppError::RateTable(_))));
    }
}
