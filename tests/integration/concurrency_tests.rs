use std::sync::Arc;
use std::thread;

use docsearch::symbol::{SearchRequest, SymbolSearcher};
use docsearch::SymbolIndex;

use crate::helpers::test_utils::load_fixture_index;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_index_is_shareable() {
    assert_send_sync::<SymbolIndex>();
    assert_send_sync::<SymbolSearcher>();
}

#[test]
fn test_concurrent_lookups_agree() {
    let index = Arc::new(load_fixture_index());
    let expected: Vec<usize> = index.lookup("str").iter().map(|e| e.ordinal).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                (0..100)
                    .map(|_| index.lookup("str").iter().map(|e| e.ordinal).collect::<Vec<_>>())
                    .last()
                    .unwrap_or_default()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_searchers_share_one_index() {
    let index = Arc::new(load_fixture_index());
    let narrow = SymbolSearcher::new(Arc::clone(&index), 2);
    let wide = SymbolSearcher::new(Arc::clone(&index), 0);

    let request = SearchRequest::new("sw");
    assert_eq!(narrow.search(&request).results.len(), 2);
    assert_eq!(wide.search(&request).results.len(), 3);
    assert_eq!(Arc::strong_count(&index), 3);
}
