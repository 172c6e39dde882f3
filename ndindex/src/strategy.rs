use proptest::prelude::*;

use crate::Bounds;
use crate::Layout;
use crate::Order;

/// Generates a random linearization order.
pub fn gen_order() -> impl Strategy<Value = Order> {
    prop_oneof![Just(Order::RowMajor), Just(Order::ColumnMajor)]
}

/// Generates one dimension of a strided view as `(size, start, end,
/// stride)` with `start <= end <= size` and `stride >= 1`. Sizes may
/// be zero.
pub fn gen_dim() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (0usize..6)
        .prop_flat_map(|size| (Just(size), 0..=size))
        .prop_flat_map(|(size, start)| (Just(size), Just(start), start..=size, 1usize..4))
}

/// Generates a dense layout of rank 0 to 4 together with valid
/// strided bounds over it.
pub fn gen_view() -> impl Strategy<Value = (Layout, Bounds)> {
    (prop::collection::vec(gen_dim(), 0..=4), gen_order()).prop_map(|(dims, order)| {
        let mut sizes = Vec::new();
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let mut strides = Vec::new();
        for (size, start, end, stride) in dims {
            sizes.push(size);
            starts.push(start);
            ends.push(end);
            strides.push(stride);
        }
        let bounds = Bounds::new(starts, ends, strides).unwrap();
        (Layout::new(order, sizes), bounds)
    })
}

#[cfg(test)]
mod tests {
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    use super::*;

    proptest! {
        #[test]
        fn gen_view_is_valid((layout, bounds) in gen_view()) {
            prop_assert!(layout.rank() <= 4);
            prop_assert!(bounds.validate(layout.dimensions()).is_ok());
        }
    }

    #[test]
    fn gen_order_covers_both() {
        let mut runner = TestRunner::deterministic();
        let mut seen = Vec::new();
        for _ in 0..64 {
            let order = gen_order().new_tree(&mut runner).unwrap().current();
            if !seen.contains(&order) {
                seen.push(order);
            }
        }
        assert_eq!(seen.len(), 2);
    }
}
