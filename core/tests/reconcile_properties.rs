// core/tests/reconcile_properties.rs
//
// Properties of reconciliation over a spread of reference phrases and
// edits:
// - accepted text only uses what the pool supports
// - reconciling the accepted text again changes nothing
// - equal keys are consumed lowest index first
// - the cursor lands at the end of the reconciled prefix

use anagram_core::{is_free, normalize, reconcile, remap_cursor, ReferencePool};

const REFERENCES: &[&str] = &[
    "Roma",
    "caffè latte",
    "Lorem ipsum dolor sit amet",
    "Ça été l'été",
    "aaaaBBBB",
    "",
];

const CANDIDATES: &[&str] = &[
    "",
    "amor",
    "mora!!",
    "caffe",
    "CAFFÈ",
    "ipsum lorem, dolor",
    "a a b",
    "zzz",
    "étè",
    "été? (sì)",
    "bbbbbbaaaaaa",
];

#[test]
fn accepted_is_subsequence_of_candidate() {
    for r in REFERENCES {
        let pool = ReferencePool::new(r);
        for c in CANDIDATES {
            let acc = reconcile(&pool, c).accepted;
            let mut it = c.chars();
            for a in acc.chars() {
                assert!(it.any(|x| x == a), "{acc:?} not a subsequence of {c:?}");
            }
        }
    }
}

#[test]
fn every_kept_char_is_free_or_consumes_a_matching_entry() {
    for r in REFERENCES {
        let pool = ReferencePool::new(r);
        for c in CANDIDATES {
            let rec = reconcile(&pool, c);
            let non_free: Vec<char> = rec.accepted.chars().filter(|ch| !is_free(*ch)).collect();
            assert_eq!(non_free.len(), rec.consumption.len());
            for (ch, idx) in non_free.iter().zip(rec.consumption.indices()) {
                let entry = pool.get(*idx).expect("index within pool");
                assert_eq!(entry.key, normalize(*ch), "{ch:?} consumed {:?}", entry.ch);
            }
        }
    }
}

#[test]
fn reconcile_is_idempotent() {
    for r in REFERENCES {
        let pool = ReferencePool::new(r);
        for c in CANDIDATES {
            let once = reconcile(&pool, c);
            let twice = reconcile(&pool, &once.accepted);
            assert_eq!(once, twice, "reference {r:?}, candidate {c:?}");
        }
    }
}

#[test]
fn free_chars_survive_any_reference() {
    let pool = ReferencePool::new("");
    let rec = reconcile(&pool, "?! ,.;:-_@#()[]{}/\\'\"+=*&%€£<>");
    assert_eq!(rec.accepted.chars().count(), 30);
    assert!(rec.consumption.is_empty());
}

#[test]
fn lowest_index_consumed_first() {
    let pool = ReferencePool::new("aAàb");
    let rec = reconcile(&pool, "aa");
    assert_eq!(rec.consumption.sorted(), vec![0, 1]);
    let rec = reconcile(&pool, "aaaa");
    assert_eq!(rec.accepted, "aaa");
    assert_eq!(rec.consumption.sorted(), vec![0, 1, 2]);
    assert_eq!(pool.leftover(&rec.consumption), vec!['b']);
}

#[test]
fn accents_and_case_fold_together() {
    let pool = ReferencePool::new("café");
    assert_eq!(reconcile(&pool, "FACE").accepted, "FACE");
    assert_eq!(reconcile(&pool, "fàcé").accepted, "fàcé");
    assert_eq!(reconcile(&pool, "facee").accepted, "face");
}

#[test]
fn spaces_in_reference_stay_leftover() {
    let pool = ReferencePool::new("a b");
    let rec = reconcile(&pool, "a b");
    assert_eq!(rec.accepted, "a b");
    assert_eq!(pool.leftover(&rec.consumption), vec![' ']);
}

#[test]
fn cursor_tracks_reconciled_prefix() {
    let pool = ReferencePool::new("roma");
    // "rxom|a": the x is dropped, the cursor moves back by one byte
    assert_eq!(remap_cursor(&pool, "rxoma", 4), 3);
    // nothing before the cursor changes
    assert_eq!(remap_cursor(&pool, "romaz", 2), 2);
    // cursor past the end clamps to the accepted length
    assert_eq!(remap_cursor(&pool, "romaz", 99), 4);
    // inside a multi-byte char: moved back to its start
    let pool = ReferencePool::new("è");
    assert_eq!(remap_cursor(&pool, "è", 1), 0);
}

#[test]
fn prefix_of_result_equals_result_of_prefix() {
    for r in REFERENCES {
        let pool = ReferencePool::new(r);
        for c in CANDIDATES {
            let full = reconcile(&pool, c).accepted;
            for (i, _) in c.char_indices() {
                let prefix = reconcile(&pool, &c[..i]).accepted;
                assert!(full.starts_with(&prefix), "{full:?} vs {prefix:?}");
            }
        }
    }
}
