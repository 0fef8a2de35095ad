#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{
        assert_strictly_increasing, assert_unique_ids, config, system_generator,
    };
    use crate::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn mint_concurrently(generator: Arc<SlotID>, threads: usize, per_thread: usize) -> Vec<u64> {
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let generator = Arc::clone(&generator);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut ids = Vec::with_capacity(per_thread);
                    for _ in 0..per_thread {
                        ids.push(generator.next_id().unwrap());
                    }
                    // Each thread sees its own IDs strictly increasing
                    assert_strictly_increasing(&ids);
                    ids
                })
            })
            .collect();

        let mut all_ids = Vec::with_capacity(threads * per_thread);
        for h in handles {
            all_ids.extend(h.join().expect("thread panicked"));
        }
        all_ids
    }

    #[test]
    fn test_stress_ten_threads_lockfree() {
        let generator = Arc::new(system_generator(7));
        let ids = mint_concurrently(generator, 10, 10_000);
        assert_unique_ids(&ids, 100_000);
    }

    #[test]
    fn test_stress_ten_threads_locked() {
        let generator = Arc::new(SlotID::new(config(7, SequenceStrategy::Locked)).unwrap());
        let ids = mint_concurrently(generator, 10, 10_000);
        assert_unique_ids(&ids, 100_000);
    }

    #[test]
    fn test_rapid_generation_is_monotonic() {
        let generator = system_generator(1);
        let ids: Vec<u64> = (0..5_000).map(|_| generator.next_id().unwrap()).collect();
        assert_strictly_increasing(&ids);
        assert_unique_ids(&ids, 5_000);
    }

    #[test]
    fn test_generators_from_one_config_do_not_share_counters() {
        let cfg = config(9, SequenceStrategy::Atomic);
        let a = SlotID::new(cfg.clone()).unwrap();
        let b = SlotID::new(cfg).unwrap();

        // First issuance from fresh counters is always sequence 0
        let id_a = a.next_id().unwrap();
        let id_b = b.next_id().unwrap();
        assert_eq!(a.decompose(id_a).sequence, 0);
        assert_eq!(b.decompose(id_b).sequence, 0);
    }

    #[test]
    fn test_cross_node_uniqueness() {
        let mut all_ids = Vec::new();
        for node in 0..10 {
            let g = system_generator(node);
            for _ in 0..100 {
                all_ids.push(g.next_id().unwrap());
            }
        }
        assert_unique_ids(&all_ids, 1000);
    }
}
