//! Runs in its own process so the global tables start uninitialized.

use std::sync::Barrier;
use std::thread;

use baybayin_core::segment::{to_baybayin, to_latin, ConvertOptions, ReverseIndex};

const PHRASE: &str = "Magandang umaga, Pilipinas! Salamat sa tubig.";
const THREADS: usize = 8;

#[test]
fn cold_tables_agree_across_threads() {
    let barrier = &Barrier::new(THREADS);
    let results: Vec<(String, String, usize)> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    barrier.wait();
                    let opts = ConvertOptions {
                        use_word_mapping: true,
                    };
                    let baybayin = to_baybayin(PHRASE, &opts);
                    let latin = to_latin(&baybayin);
                    let index = ReverseIndex::global() as *const ReverseIndex as usize;
                    (baybayin, latin, index)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &results[0];
    assert_eq!(first.1, "magandang umaga, pilipinas! salamat sa tubig.");
    for r in &results[1..] {
        assert_eq!(r.0, first.0);
        assert_eq!(r.1, first.1);
        // every thread sees the same singleton
        assert_eq!(r.2, first.2);
    }
}
