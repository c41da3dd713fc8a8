#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use pairkit::error::QueueError;
use pairkit::pair::{Decrease, Pair, Triple};
use pairkit::queue::HfQueue;

const MIN_FREQ: usize = 3;
const MAX_SIZE: usize = 32;

// Fuzz arbitrary operation sequences on HfQueue
//
// Each step reads (op, key, freq) and checks the queue against a HashMap
// model: insert, decrease, remove, compact, and extremum queries.
fuzz_target!(|data: &[u8]| {
    let mut queue: HfQueue<u8> = HfQueue::new(MAX_SIZE, MIN_FREQ);
    let mut model: HashMap<Pair<u8>, Triple> = HashMap::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 6;
        let pair = Pair::new(chunk[1] % 48, chunk[1] / 48);
        let freq = usize::from(chunk[2]);

        match op {
            0 | 1 => {
                // insert
                let triple = Triple::new(usize::from(chunk[1]), 0, freq);
                let result = queue.insert(pair, triple);
                if freq < MIN_FREQ {
                    assert!(matches!(result, Err(QueueError::FrequencyOutOfRange { .. })));
                } else if model.contains_key(&pair) {
                    assert_eq!(result, Err(QueueError::Duplicate));
                } else if model.len() >= MAX_SIZE {
                    assert_eq!(result, Err(QueueError::CapacityExceeded { max_size: MAX_SIZE }));
                } else {
                    assert_eq!(result, Ok(()));
                    model.insert(pair, triple);
                }
            }
            2 => {
                // decrease
                match (queue.decrease(&pair), model.get(&pair).copied()) {
                    (Err(QueueError::Absent), None) => {}
                    (Ok(Decrease::Evicted(triple)), Some(old)) => {
                        assert_eq!(triple, old.with_freq(old.freq - 1));
                        assert!(triple.freq < MIN_FREQ);
                        model.remove(&pair);
                    }
                    (Ok(Decrease::Decremented { freq }), Some(old)) => {
                        assert_eq!(freq, old.freq - 1);
                        model.insert(pair, old.with_freq(freq));
                    }
                    (result, expected) => panic!("decrease mismatch: {result:?} vs {expected:?}"),
                }
            }
            3 => {
                // remove
                let result = queue.remove(&pair);
                match model.remove(&pair) {
                    Some(triple) => assert_eq!(result, Ok(triple)),
                    None => assert_eq!(result, Err(QueueError::Absent)),
                }
            }
            4 => {
                // compact
                queue.compact();
                assert_eq!(queue.allocated_slots(), queue.len());
            }
            5 => {
                // extremes
                match (queue.max(), queue.min()) {
                    (Ok(max), Ok(min)) => {
                        let top = model.values().map(|t| t.freq).max();
                        let bottom = model.values().map(|t| t.freq).min();
                        assert_eq!(Some(model[&max].freq), top);
                        assert_eq!(Some(model[&min].freq), bottom);
                    }
                    (Err(QueueError::Empty), Err(QueueError::Empty)) => assert!(model.is_empty()),
                    other => panic!("extremes mismatch: {other:?}"),
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(queue.len(), model.len());
        assert!(queue.check_invariants().is_ok());
    }

    for (pair, triple) in &model {
        assert_eq!(queue.lookup(pair), Ok(*triple));
    }
});
