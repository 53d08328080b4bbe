//! Registry Invariant Tests
//!
//! Random refresh sequences against the selection and label invariants

use capture_runtime::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Publish(Vec<u32>),
    FailInit,
    FailRead,
    Select(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => prop::collection::vec(0u32..8, 0..6).prop_map(Step::Publish),
        1 => Just(Step::FailInit),
        1 => Just(Step::FailRead),
        2 => (0u32..8).prop_map(Step::Select),
    ]
}

fn directory(pids: &[u32]) -> Directory {
    pids.iter()
        .map(|&pid| {
            CaptureSource::new(pid, format!("proc{}.exe", pid), PixelFormat::I420, 320, 240, 25.0)
        })
        .collect()
}

fn assert_invariants(registry: &SourceRegistry) {
    let entry_keys: Vec<u32> = registry.entries().keys().copied().collect();
    let label_keys: Vec<u32> = registry.labels().keys().copied().collect();
    assert_eq!(entry_keys, label_keys, "labels and entries must share keys");
    assert!(!registry.entries().contains_key(&0));

    if registry.is_empty() {
        assert_eq!(registry.current_process_id(), 0);
    } else {
        assert!(registry.entries().contains_key(&registry.current_process_id()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_refresh_sequences_keep_invariants(steps in prop::collection::vec(step(), 1..24)) {
            let mut registry = SourceRegistry::default();
            let mut transport = StaticDirectory::default();

            for step in steps {
                let fail_init = matches!(step, Step::FailInit);
                match step {
                    Step::Publish(pids) => {
                        transport.publish(directory(&pids));
                        prop_assert!(registry.refresh(&mut transport).is_refreshed());
                        let expected: std::collections::BTreeSet<u32> =
                            pids.iter().copied().filter(|&pid| pid != 0).collect();
                        let actual: std::collections::BTreeSet<u32> =
                            registry.entries().keys().copied().collect();
                        prop_assert_eq!(actual, expected);
                    }
                    Step::FailInit | Step::FailRead => {
                        let before = registry.snapshot();
                        let selection = registry.current_process_id();
                        transport.publish(directory(&[1, 2, 3]));
                        transport.set_fail_init(fail_init);
                        transport.set_fail_read(!fail_init);

                        prop_assert_eq!(registry.refresh(&mut transport), RefreshOutcome::Skipped);
                        let after = registry.snapshot();
                        prop_assert_eq!(after, before);
                        prop_assert_eq!(registry.current_process_id(), selection);

                        transport.set_fail_init(false);
                        transport.set_fail_read(false);
                    }
                    Step::Select(pid) => {
                        let known = registry.entries().contains_key(&pid);
                        let before = registry.current_process_id();
                        let result = registry.select(pid);
                        prop_assert_eq!(result.is_ok(), known && pid != 0);
                        if result.is_err() {
                            prop_assert_eq!(registry.current_process_id(), before);
                        }
                    }
                }
                assert_invariants(&registry);
            }
        }

        #[test]
        fn test_label_is_deterministic(
            pid in 1u32..u32::MAX,
            name in "[a-z]{1,12}\\.exe",
            width in 1u32..4096,
            height in 1u32..4096,
            fps in 1.0f64..240.0,
        ) {
            let source =
                CaptureSource::new(pid, name.clone(), PixelFormat::RGB0, width, height, fps);
            let first = derive_label(&SourceEntry::from(&source));
            let second = derive_label(&SourceEntry::from(&source.clone()));

            prop_assert_eq!(&first, &second);
            let prefix = format!("[{}] {} (RGB0 {}x{} ", pid, name, width, height);
            prop_assert!(first.starts_with(&prefix));
            prop_assert!(first.ends_with("fps)"));
        }
    }

    #[test]
    fn test_directory_scenario_with_sentinel() {
        let mut registry = SourceRegistry::default();
        let mut transport = StaticDirectory::new(Directory::new(vec![
            CaptureSource::new(0, "", PixelFormat::IYUV, 0, 0, 0.0),
            CaptureSource::new(7, "app.exe", PixelFormat::IYUV, 640, 480, 30.0),
        ]));

        registry.refresh(&mut transport);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.labels().get(&7).map(String::as_str),
            Some("[7] app.exe (IYUV 640x480 30fps)")
        );
        assert_invariants(&registry);
    }

    #[test]
    fn test_selection_survives_only_while_present() {
        let mut registry = SourceRegistry::default();
        let mut transport = StaticDirectory::new(directory(&[7]));
        registry.refresh(&mut transport);
        assert_eq!(registry.current_process_id(), 7);

        transport.publish(directory(&[9]));
        registry.refresh(&mut transport);
        assert_eq!(registry.current_process_id(), 9);

        transport.publish(directory(&[]));
        registry.refresh(&mut transport);
        assert_eq!(registry.current_process_id(), 0);
        assert_eq!(registry.current_parameters(), RuntimeConfig::default().fallback_parameters());
    }
}
