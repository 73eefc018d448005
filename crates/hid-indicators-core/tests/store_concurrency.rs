//! Integration tests for the indicator store under concurrent writers.
//!
//! Writers run on plain OS threads, as transport report handlers would, and
//! exercise the public API only.

use std::sync::{Arc, Barrier};
use std::thread;

use hid_indicators_core::{Endpoint, IndicatorMask, IndicatorStore, SlotLayout, Transport};

const ITERATIONS: usize = 10_000;

#[test]
fn test_concurrent_writers_on_distinct_slots_never_corrupt_each_other() {
    // Arrange: one thread per slot, each writing its own signature values.
    let layout = SlotLayout::new(true, 5);
    let store = Arc::new(IndicatorStore::new(layout));
    let endpoints: Vec<Endpoint> = std::iter::once(Endpoint::wired())
        .chain((0..5).map(Endpoint::wireless))
        .collect();
    let barrier = Arc::new(Barrier::new(endpoints.len()));

    // Act
    let handles: Vec<_> = endpoints
        .iter()
        .enumerate()
        .map(|(i, &endpoint)| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // High nibble identifies the writer, low nibble varies.
                let tag = (i as u8) << 4;
                barrier.wait();
                for n in 0..ITERATIONS {
                    let mask = IndicatorMask(tag | (n as u8 & 0x0F));
                    assert!(store.set(endpoint, mask));
                    let seen = store.get(endpoint);
                    assert_eq!(seen.bits() & 0xF0, tag, "slot {endpoint} saw a foreign write");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    // Assert: every slot holds its own writer's final value.
    let last = ((ITERATIONS - 1) as u8) & 0x0F;
    for (i, endpoint) in endpoints.iter().enumerate() {
        assert_eq!(store.get(*endpoint), IndicatorMask(((i as u8) << 4) | last));
    }
}

#[test]
fn test_concurrent_out_of_range_writes_leave_table_untouched() {
    let store = Arc::new(IndicatorStore::new(SlotLayout::new(true, 3)));
    store.set(Endpoint::wireless(1), IndicatorMask(0x02));
    let before = store.snapshot();

    let handles: Vec<_> = (3u8..8)
        .map(|profile| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    assert!(!store.set(Endpoint::wireless(profile), IndicatorMask(0xFF)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_scenario_one_wired_three_wireless() {
    let store = IndicatorStore::new(SlotLayout::new(true, 3));
    assert_eq!(store.layout().capacity(), 4);

    store.set(Endpoint::wireless(1), IndicatorMask(IndicatorMask::CAPS_LOCK));

    assert_eq!(store.get(Endpoint::wireless(1)), IndicatorMask(0x02));
    assert_eq!(store.get(Endpoint::new(Transport::Wired, 0)), IndicatorMask(0x00));
}

#[test]
fn test_endpoint_deserializes_from_config_text() {
    let endpoint: Endpoint = toml::from_str(
        r#"
transport = "wireless"
profile = 2
"#,
    )
    .expect("deserialize endpoint");
    assert_eq!(endpoint, Endpoint::wireless(2));

    let wired: Endpoint = toml::from_str(r#"transport = "wired""#).expect("deserialize wired");
    assert_eq!(wired, Endpoint::wired());
}
