//! Operation counters for the customer data workflow.
//!
//! Every service operation records a `(operation, outcome)` counter plus the
//! accumulated wall time, keyed as `customer_data.<operation>.<outcome>`.
//! Recording is side-effect-only: a poisoned registry drops the sample
//! instead of failing the operation that produced it.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::error::{ErrorKind, ServiceError};

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct OperationStats {
    pub count: u64,
    pub total_duration_us: u64,
}

static REGISTRY: Lazy<RwLock<BTreeMap<String, OperationStats>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

/// Record one sample for the given operation and outcome.
pub fn record(operation: &str, outcome: &str, elapsed: Duration) {
    let key = format!("customer_data.{}.{}", operation, outcome);
    if let Ok(mut registry) = REGISTRY.write() {
        let entry = registry.entry(key).or_default();
        entry.count += 1;
        entry.total_duration_us = entry
            .total_duration_us
            .saturating_add(elapsed.as_micros() as u64);
    }
}

/// Map a service result onto its counter outcome label.
pub fn outcome_label<T>(result: &Result<T, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(err) => match err.kind() {
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::BadRequest => "invalid",
            ErrorKind::InternalServerError => "failure",
        },
    }
}

/// Current counter values, keyed by qualified operation name.
pub fn snapshot() -> BTreeMap<String, OperationStats> {
    REGISTRY
        .read()
        .map(|registry| registry.clone())
        .unwrap_or_default()
}

/// Run a block, then record its outcome and duration under `$operation`.
///
/// The block must evaluate to a `ServiceResult`; the result is passed through
/// unchanged so measuring never alters control flow.
#[macro_export]
macro_rules! measure_operation {
    ($operation:expr, $body:block) => {{
        let started = ::std::time::Instant::now();
        let result = $body;
        $crate::metrics::record(
            $operation,
            $crate::metrics::outcome_label(&result),
            started.elapsed(),
        );
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::measure_operation;

    fn stats_for(key: &str) -> OperationStats {
        snapshot().get(key).copied().unwrap_or_default()
    }

    #[test]
    fn record_accumulates_counts_and_duration() {
        record("record_test", "success", Duration::from_micros(40));
        record("record_test", "success", Duration::from_micros(2));

        let stats = stats_for("customer_data.record_test.success");
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_duration_us, 42);
    }

    #[test]
    fn outcome_labels_cover_the_taxonomy() {
        assert_eq!(outcome_label::<()>(&Ok(())), "success");
        assert_eq!(
            outcome_label::<()>(&Err(ServiceError::conflict("dup"))),
            "conflict"
        );
        assert_eq!(
            outcome_label::<()>(&Err(ServiceError::not_found("missing"))),
            "not_found"
        );
        assert_eq!(
            outcome_label::<()>(&Err(ServiceError::bad_request("bad"))),
            "invalid"
        );
        assert_eq!(
            outcome_label::<()>(&Err(ServiceError::internal_server_error("boom"))),
            "failure"
        );
    }

    #[test]
    fn measure_operation_records_without_changing_the_result() {
        let ok: Result<u32, ServiceError> = measure_operation!("measure_test", { Ok(7) });
        assert_eq!(ok.unwrap(), 7);
        assert_eq!(stats_for("customer_data.measure_test.success").count, 1);

        let err: Result<u32, ServiceError> =
            measure_operation!("measure_test", { Err(ServiceError::not_found("missing")) });
        assert!(err.is_err());
        assert_eq!(stats_for("customer_data.measure_test.not_found").count, 1);
    }
}
