//! Fan-Out Engine Tests
//!
//! ## Test Scopes
//! - **Accounting**: one result per instance, in input order, for any N.
//! - **Isolation**: failing instances do not disturb successful ones.
//! - **Concurrency**: every operation is in flight at the same time.
//! - **Orchestration**: a panicking operation fails the dispatch, after all others settle.

#[cfg(test)]
mod tests {
    use crate::fanout::engine::{dispatch, failures};
    use crate::fanout::types::{OrchestrationError, PerInstanceResult};
    use crate::instances::types::Instance;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn instances(names: &[&str]) -> Vec<Instance> {
        names
            .iter()
            .map(|n| Instance::new(*n, &format!("https://{}.example.com", n.to_lowercase()), "key"))
            .collect()
    }

    fn names<T>(results: &[PerInstanceResult<T>]) -> Vec<String> {
        results.iter().map(|r| r.instance.name.clone()).collect()
    }

    // ============================================================
    // ACCOUNTING TESTS
    // ============================================================

    #[tokio::test]
    async fn test_empty_instance_list_dispatches_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let results = dispatch(&[], move |_instance| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<Vec<u32>, String>(vec![1])
            }
        })
        .await
        .unwrap();

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_one_result_per_instance_for_various_sizes() {
        for n in 0..6 {
            let list: Vec<Instance> = (0..n)
                .map(|i| Instance::new(format!("inst-{}", i), "https://x.example.com", "k"))
                .collect();

            let results = dispatch(&list, |instance| async move {
                Ok::<_, String>(vec![instance.name.clone()])
            })
            .await
            .unwrap();

            assert_eq!(results.len(), n);
            for (i, r) in results.iter().enumerate() {
                assert_eq!(r.instance.name, format!("inst-{}", i));
                assert_eq!(r.items, vec![format!("inst-{}", i)]);
            }
        }
    }

    #[tokio::test]
    async fn test_order_follows_input_not_completion() {
        let list = instances(&["Slow", "Medium", "Fast"]);

        let results = dispatch(&list, |instance| async move {
            let delay = match instance.name.as_str() {
                "Slow" => 120,
                "Medium" => 60,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, String>(vec![instance.name.clone()])
        })
        .await
        .unwrap();

        assert_eq!(names(&results), vec!["Slow", "Medium", "Fast"]);
        // Items are never swapped between instances
        for r in &results {
            assert_eq!(r.items, vec![r.instance.name.clone()]);
        }
    }

    #[tokio::test]
    async fn test_item_order_within_instance_is_preserved() {
        let list = instances(&["A"]);

        let results = dispatch(&list, |_instance| async move {
            Ok::<_, String>(vec!["third", "first", "second"])
        })
        .await
        .unwrap();

        assert_eq!(results[0].items, vec!["third", "first", "second"]);
    }

    // ============================================================
    // ISOLATION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_instance() {
        let list = instances(&["A", "B"]);

        let results = dispatch(&list, |instance| async move {
            if instance.name == "B" {
                Err("connection refused".to_string())
            } else {
                Ok(vec!["d1", "d2"])
            }
        })
        .await
        .unwrap();

        assert_eq!(names(&results), vec!["A", "B"]);
        assert_eq!(results[0].items, vec!["d1", "d2"]);
        assert!(!results[0].is_failed());

        assert!(results[1].items.is_empty());
        let failure = results[1].failure.as_ref().unwrap();
        assert_eq!(failure.instance, "B");
        assert!(failure.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_all_instances_failing_still_resolves() {
        let list = instances(&["A", "B", "C"]);

        let results = dispatch(&list, |instance| async move {
            Err::<Vec<u8>, _>(format!("{} is down", instance.name))
        })
        .await
        .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.items.is_empty() && r.is_failed()));

        let diagnostics: Vec<&str> = failures(&results)
            .into_iter()
            .map(|f| f.instance.as_str())
            .collect();
        assert_eq!(diagnostics, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_slow_failure_does_not_drop_fast_success() {
        let list = instances(&["Failing", "Healthy"]);

        let results = dispatch(&list, |instance| async move {
            if instance.name == "Failing" {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Err("HTTP 500".to_string())
            } else {
                Ok(vec![1, 2, 3])
            }
        })
        .await
        .unwrap();

        assert_eq!(results[1].items, vec![1, 2, 3]);
        assert_eq!(failures(&results).len(), 1);
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[tokio::test]
    async fn test_operations_run_concurrently() {
        let list = instances(&["A", "B", "C", "D"]);
        // The barrier only opens once every operation has started, so a
        // sequential dispatch would never get past the first instance.
        let barrier = Arc::new(Barrier::new(list.len()));

        let dispatched = tokio::time::timeout(
            Duration::from_secs(5),
            dispatch(&list, |instance| {
                let barrier = barrier.clone();
                async move {
                    barrier.wait().await;
                    Ok::<_, String>(vec![instance.name.clone()])
                }
            }),
        )
        .await;

        let results = dispatched
            .expect("dispatch should not serialize operations")
            .unwrap();
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_instances_are_passed_unmodified() {
        let list = instances(&["A", "B"]);
        let before = list.clone();

        let results = dispatch(&list, |instance| async move {
            Ok::<_, String>(vec![(instance.url.clone(), instance.api_key.clone())])
        })
        .await
        .unwrap();

        assert_eq!(list, before);
        assert_eq!(results[0].items[0].0, "https://a.example.com");
        assert_eq!(results[1].instance, before[1]);
    }

    // ============================================================
    // ORCHESTRATION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_panicking_operation_is_orchestration_error() {
        let list = instances(&["A", "Broken", "C"]);
        let settled = Arc::new(AtomicUsize::new(0));
        let settled_clone = settled.clone();

        let result = dispatch(&list, move |instance| {
            let settled = settled_clone.clone();
            async move {
                if instance.name == "Broken" {
                    panic!("malformed operation");
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
                settled.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(vec![1])
            }
        })
        .await;

        assert_eq!(
            result,
            Err(OrchestrationError::OperationPanicked {
                instance: "Broken".to_string()
            })
        );
        // Healthy operations still ran to completion
        assert_eq!(settled.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panic_while_building_future_is_caught() {
        let list = instances(&["A", "Broken"]);

        let result = dispatch(&list, |instance| {
            if instance.name == "Broken" {
                panic!("closure blew up before returning a future");
            }
            async move { Ok::<_, String>(vec![1]) }
        })
        .await;

        assert!(matches!(
            result,
            Err(OrchestrationError::OperationPanicked { instance }) if instance == "Broken"
        ));
    }
}
