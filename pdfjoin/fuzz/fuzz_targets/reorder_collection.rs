#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfjoin::OrderedCollection;

fuzz_target!(|data: &[u8]| {
    let Some((&len, order)) = data.split_first() else {
        return;
    };
    let len = usize::from(len % 32);
    let collection: OrderedCollection<usize> = (0..len).collect::<Vec<_>>().into();
    let order: Vec<usize> = order.iter().map(|&b| usize::from(b)).collect();

    match collection.replace_order(&order) {
        Ok(reordered) => {
            let values: Vec<usize> = reordered.iter().copied().collect();
            assert_eq!(values, order);
            assert_eq!(collection.len(), len);
        }
        Err(_) => {
            let mut sorted = order.clone();
            sorted.sort_unstable();
            assert_ne!(sorted, (0..len).collect::<Vec<_>>());
        }
    }
});
