#![no_main]

use libfuzzer_sys::fuzz_target;
use pairkit::ds::IntrusiveList;

// Fuzz IntrusiveList compaction against a Vec model
//
// Random pushes, insert_after, move_after and removals punch holes into the
// arena; compaction must keep the order and remap every live id.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => ids.push(list.push_front(value)),
            1 => ids.push(list.push_back(value)),
            2 => {
                // insert_after
                if !ids.is_empty() {
                    let anchor = ids[pair[1] as usize % ids.len()];
                    if let Some(id) = list.insert_after(anchor, value) {
                        assert_eq!(list.prev_id(id), Some(anchor));
                        ids.push(id);
                    }
                }
            }
            3 => {
                // move_after
                if ids.len() >= 2 {
                    let id = ids[pair[1] as usize % ids.len()];
                    let anchor = ids[(pair[1] as usize / 2) % ids.len()];
                    if list.move_after(id, anchor) {
                        assert_eq!(list.next_id(anchor), Some(id));
                    }
                }
            }
            4 => {
                // remove
                if !ids.is_empty() {
                    let id = ids.swap_remove(pair[1] as usize % ids.len());
                    assert!(list.remove(id).is_some());
                }
            }
            5 => {
                // compact
                let before: Vec<u32> = list.iter().copied().collect();
                let relocation = list.compact();
                for id in &mut ids {
                    *id = relocation.get(*id).expect("live id lost by compaction");
                }
                let after: Vec<u32> = list.iter().copied().collect();
                assert_eq!(before, after);
                assert_eq!(list.allocated(), list.len());
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), ids.len());
        list.debug_validate_invariants();
    }
});
