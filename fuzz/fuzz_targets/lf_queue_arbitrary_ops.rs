#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use pairkit::error::QueueError;
use pairkit::pair::{Decrease, Pair, Triple};
use pairkit::queue::LfQueue;

const MAX_FREQ: usize = 12;
const MAX_SIZE: usize = 48;

// Fuzz arbitrary operation sequences on LfQueue
//
// Exercises bucket splicing and unsplicing across gaps in the frequency
// range. The skip list is validated after every step.
fuzz_target!(|data: &[u8]| {
    let mut queue: LfQueue<u8> = LfQueue::new(MAX_SIZE, MAX_FREQ);
    let mut model: HashMap<Pair<u8>, Triple> = HashMap::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 5;
        let pair = Pair::new(chunk[1] % 64, 7);
        let freq = usize::from(chunk[2] % 16);

        match op {
            0 | 1 => {
                // insert
                let triple = Triple::new(freq, usize::from(chunk[1]), freq);
                let result = queue.insert(pair, triple);
                if freq == 0 || freq > MAX_FREQ {
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
                        assert_eq!(old.freq, 1);
                        assert_eq!(triple, old.with_freq(0));
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
                // head / max
                if let Ok(head) = queue.head() {
                    let bottom = model.values().map(|t| t.freq).min();
                    assert_eq!(Some(model[&head].freq), bottom);
                    let top = queue.max().map(|p| model[&p].freq).ok();
                    assert_eq!(top, model.values().map(|t| t.freq).max());
                } else {
                    assert!(model.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(queue.len(), model.len());
        assert!(queue.check_invariants().is_ok());
    }
});
