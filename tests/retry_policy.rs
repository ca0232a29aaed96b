//! Retry behaviour of provider calls

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use brand_compliance::config::RetryConfig;
use brand_compliance::{BrandComplianceError, RetryPolicy};

fn quick(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(1), Duration::from_millis(5))
        .with_jitter(Duration::ZERO)
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let value = quick(3)
        .run("flaky", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(BrandComplianceError::provider("upstream hiccup", Some(502)))
                } else {
                    Ok("done")
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, "done");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn last_error_is_returned_when_retries_run_out() {
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let err = quick(2)
        .run("always_down", || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(BrandComplianceError::provider(format!("down #{n}"), Some(503)))
            }
        })
        .await
        .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(err.to_string().contains("down #2"));
}

#[tokio::test]
async fn client_errors_fail_immediately() {
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let err = quick(5)
        .run("bad_request", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(BrandComplianceError::provider("invalid model", Some(400)))
            }
        })
        .await
        .unwrap_err();

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn rate_limits_are_retried() {
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let _ = quick(1)
        .run("rate_limited", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(BrandComplianceError::provider("slow down", Some(429)))
            }
        })
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn non_interactive_mode_disables_retries() {
    let cfg = RetryConfig {
        non_interactive: true,
        max_retries: 4,
        ..RetryConfig::default()
    };
    assert_eq!(RetryPolicy::from_config(&cfg).max_retries, 0);
}

#[test]
fn delays_never_exceed_the_cap() {
    let policy = RetryPolicy::new(4, Duration::from_millis(1000), Duration::from_millis(30_000));
    for attempt in 0..12 {
        assert!(policy.delay_for(attempt) <= Duration::from_millis(30_000));
    }
    // Base alone already exceeds the cap by attempt 5
    assert_eq!(policy.delay_for(6), Duration::from_millis(30_000));
}
