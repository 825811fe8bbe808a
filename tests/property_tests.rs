//! Property-based tests for threshold evaluation using proptest
//!
//! These tests verify that certain properties hold true for all inputs:
//! - The severity bands partition the input space in absolute mode
//! - Boundary values always escalate to the higher tier
//! - Severity is monotone in the current connection count
//! - Evaluation is total (never panics) and pure

use postgres_checks::ConnectionMetrics;
use postgres_checks::config::ThresholdConfig;
use postgres_checks::thresholds::{Severity, evaluate};
use proptest::prelude::*;

fn metrics(max: i64, reserved: i64, current: i64) -> ConnectionMetrics {
    ConnectionMetrics {
        max_connections: max,
        superuser_reserved_connections: reserved,
        current_connections: current,
    }
}

// Property: below the warning threshold, absolute mode is always Ok
proptest! {
    #[test]
    fn prop_absolute_below_warning_is_ok(
        warning in 1i64..5000,
        headroom in 1i64..5000,
        slack in 1i64..1000,
    ) {
        let critical = warning + headroom;
        let current = warning - slack.min(warning);
        let thresholds = ThresholdConfig { warning, critical, percentage: false };

        let (severity, _) = evaluate(&metrics(10_000, 3, current), &thresholds);

        prop_assert_eq!(severity, Severity::Ok);
    }
}

// Property: between warning (inclusive) and critical (exclusive) is Warning
proptest! {
    #[test]
    fn prop_absolute_warning_band(
        warning in 1i64..5000,
        headroom in 1i64..5000,
        offset in 0i64..5000,
    ) {
        let critical = warning + headroom;
        let current = warning + offset.min(headroom - 1);
        let thresholds = ThresholdConfig { warning, critical, percentage: false };

        let (severity, _) = evaluate(&metrics(10_000, 3, current), &thresholds);

        prop_assert_eq!(severity, Severity::Warning);
    }
}

// Property: at or above critical is always Critical, even when warning also matches
proptest! {
    #[test]
    fn prop_absolute_at_or_above_critical_is_critical(
        warning in 1i64..5000,
        headroom in 0i64..5000,
        excess in 0i64..5000,
    ) {
        let critical = warning + headroom;
        let current = critical + excess;
        let thresholds = ThresholdConfig { warning, critical, percentage: false };

        let (severity, _) = evaluate(&metrics(10_000, 3, current), &thresholds);

        prop_assert_eq!(severity, Severity::Critical);
    }
}

// Property: severity never decreases as current connections grow
proptest! {
    #[test]
    fn prop_severity_monotone_in_current(
        warning in 1i64..5000,
        headroom in 1i64..5000,
        lower in 0i64..10_000,
        bump in 0i64..10_000,
        percentage in any::<bool>(),
    ) {
        let thresholds = ThresholdConfig {
            warning,
            critical: warning + headroom,
            percentage,
        };

        let (low, _) = evaluate(&metrics(10_000, 3, lower), &thresholds);
        let (high, _) = evaluate(&metrics(10_000, 3, lower + bump), &thresholds);

        prop_assert!(low <= high);
    }
}

// Property: percentage mode matches the inclusive comparison on 100*current/max
proptest! {
    #[test]
    fn prop_percentage_critical_boundary(
        max in 1i64..10_000,
        current in 0i64..20_000,
        warning in 0i64..100,
        headroom in 0i64..100,
    ) {
        let critical = warning + headroom;
        let thresholds = ThresholdConfig { warning, critical, percentage: true };
        let pct = 100.0 * current as f64 / max as f64;

        let (severity, _) = evaluate(&metrics(max, 0, current), &thresholds);

        if pct >= critical as f64 {
            prop_assert_eq!(severity, Severity::Critical);
        } else if pct >= warning as f64 {
            prop_assert_eq!(severity, Severity::Warning);
        } else {
            prop_assert_eq!(severity, Severity::Ok);
        }
    }
}

// Property: evaluation is total and pure over its whole input domain,
// including max_connections == 0 in percentage mode
proptest! {
    #[test]
    fn prop_evaluate_total_and_pure(
        max in 0i64..10_000,
        reserved in 0i64..100,
        current in 0i64..20_000,
        warning in 0i64..10_000,
        headroom in 0i64..10_000,
        percentage in any::<bool>(),
    ) {
        let m = metrics(max, reserved, current);
        let thresholds = ThresholdConfig { warning, critical: warning + headroom, percentage };

        let first = evaluate(&m, &thresholds);
        let second = evaluate(&m, &thresholds);

        prop_assert_eq!(first, second);
    }
}
