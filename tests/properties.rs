//! Randomized checks of the range, ordering and shape engines against
//! straightforward reference implementations.

use std::cmp::Ordering;

use apl_kernel::{
    both, compatible, conformance, get_range, insertion_sort, merge, move_range, rho, set_range,
    transpose, trisect, trisect_tagged_by, Index, KernelError, Mode, Rank, Store, Value,
};
use apl_testing::is_sorted_by;

const ITERS: usize = 200;

fn random_store(rng: &mut fastrand::Rng, len: usize) -> Store<i32> {
    let slots = (0..len)
        .map(|_| (rng.u8(0..4) != 0).then(|| rng.i32(-50..50)))
        .collect();
    Store::from_slots(slots)
}

fn positions(a: Index, b: Index) -> Vec<usize> {
    if a <= b {
        (a..=b).map(|i| i as usize).collect()
    } else {
        (b..=a).rev().map(|i| i as usize).collect()
    }
}

/// Copy via a temporary buffer, pairing source and destination positions in
/// traversal order.
fn reference_move(store: &Store<i32>, src: &[usize], dest: &[usize]) -> Store<i32> {
    let buffer: Vec<_> = src.iter().map(|&i| store.get(i).copied()).collect();
    let mut expected = store.clone();
    for (&pos, value) in dest.iter().zip(buffer) {
        expected.set(pos, value);
    }
    expected
}

#[test]
fn test_set_then_get() {
    let mut rng = fastrand::Rng::with_seed(1234);
    for _ in 0..ITERS {
        let mut store = random_store(&mut rng, 16);
        let a = rng.isize(1..=20);
        let b = rng.isize(1..=20);
        let len = (b - a).unsigned_abs() + 1;
        let values: Vec<_> = (0..len).map(|_| Some(rng.i32(..))).collect();

        set_range(&mut store, a, Some(b), &values).unwrap();
        assert_eq!(get_range(&store, a, b).unwrap(), values);
    }
}

#[test]
fn test_move_matches_buffered_copy() {
    let mut rng = fastrand::Rng::with_seed(5678);
    for _ in 0..ITERS {
        let store = random_store(&mut rng, 20);
        let a1 = rng.isize(1..=20);
        let b1 = rng.isize(1..=20);
        let span = b1 - a1;

        // Same direction, destination end derived.
        let a2 = rng.isize(1..=20);
        if a2 + span >= 1 {
            let mut actual = store.clone();
            move_range(&mut actual, a1, b1, a2, None).unwrap();
            let expected = reference_move(&store, &positions(a1, b1), &positions(a2, a2 + span));
            assert_eq!(actual, expected, "move {}..{} -> {}", a1, b1, a2);
        }

        // Explicit destination of either direction.
        let a2 = rng.isize(1..=20);
        let b2 = if rng.bool() { a2 + span } else { a2 - span };
        if b2 >= 1 {
            let mut actual = store.clone();
            move_range(&mut actual, a1, b1, a2, Some(b2)).unwrap();
            let expected = reference_move(&store, &positions(a1, b1), &positions(a2, b2));
            assert_eq!(actual, expected, "move {}..{} -> {}..{}", a1, b1, a2, b2);
        }
    }
}

#[test]
fn test_move_length_mismatch() {
    let mut store = Store::from([1, 2, 3, 4]);
    assert_eq!(
        move_range(&mut store, 1, 3, 2, Some(3)).map(|_| ()),
        Err(KernelError::LengthMismatch { source: 3, dest: 2 })
    );
    assert_eq!(store, Store::from([1, 2, 3, 4]));
}

#[test]
fn test_transpose_twice_is_identity() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..ITERS {
        let m = rng.isize(1..=6);
        let n = rng.isize(1..=6);
        let src: Store<i32> = (0..(m * n) as i32).collect();

        let mut once = Store::new();
        transpose(&src, m, n, &mut once).unwrap();
        let mut twice = Store::new();
        transpose(&once, n, m, &mut twice).unwrap();
        assert_eq!(twice, src);
    }
}

#[test]
fn test_insertion_sort_random() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..ITERS {
        let len = rng.usize(1..30);
        let mut items: Vec<i32> = (0..len).map(|_| rng.i32(0..10)).collect();
        let mut store = Store::from(items.clone());

        insertion_sort(&mut store, 1, len as Index).unwrap();
        let sorted: Vec<i32> = store.iter().flatten().copied().collect();
        assert!(is_sorted_by(&sorted, |a, b| a <= b));

        items.sort();
        assert_eq!(sorted, items);

        // Sorting a sorted range changes nothing.
        let before = store.clone();
        insertion_sort(&mut store, 1, len as Index).unwrap();
        assert_eq!(store, before);
    }
}

#[test]
fn test_merge_random() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..ITERS {
        // A single-element left run is a no-op.
        let mut left: Vec<i32> = (0..rng.usize(2..12)).map(|_| rng.i32(0..20)).collect();
        let mut right: Vec<i32> = (0..rng.usize(1..12)).map(|_| rng.i32(0..20)).collect();
        left.sort();
        right.sort();

        let mid = left.len() as Index;
        let hi = mid + right.len() as Index;
        let mut store: Store<i32> = left.iter().chain(right.iter()).copied().collect();
        merge(&mut store, 1, mid, hi).unwrap();

        let mut expected: Vec<i32> = left.into_iter().chain(right).collect();
        expected.sort();
        assert_eq!(store, Store::from(expected));
    }
}

#[test]
fn test_trisect_random() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..ITERS {
        let len = rng.usize(2..25);
        let original: Vec<i32> = (0..len).map(|_| rng.i32(0..6)).collect();
        let pivot = rng.i32(0..6);
        let mut store = Store::from(original.clone());
        let mut tags: Store<usize> = (0..len).collect();

        let (lt, gt) =
            trisect_tagged_by(&mut store, 1, len as Index, Some(&pivot), |a, b| a < b, &mut tags)
                .unwrap();

        let values: Vec<i32> = store.iter().flatten().copied().collect();
        for (i, value) in values.iter().enumerate() {
            let pos = i as Index + 1;
            if pos <= lt {
                assert!(*value < pivot);
            } else if pos < gt {
                assert_eq!(*value, pivot);
            } else {
                assert!(*value > pivot);
            }
        }

        // The tags record where each element came from.
        for (value, tag) in values.iter().zip(tags.iter()) {
            assert_eq!(*value, original[*tag.unwrap()]);
        }

        // Without tags the zones are the same.
        let mut untagged = Store::from(original);
        assert_eq!(
            trisect(&mut untagged, 1, len as Index, Some(&pivot)),
            Ok((lt, gt))
        );
    }
}

#[test]
fn test_trisect_by_key_random() {
    let mut rng = fastrand::Rng::with_seed(31);
    for _ in 0..ITERS {
        let len = rng.usize(2..25);
        // Each element carries its original position, which the comparator
        // ignores.
        let original: Vec<(i32, usize)> = (0..len).map(|i| (rng.i32(0..5), i)).collect();
        let pivot = (rng.i32(0..5), usize::MAX);
        let mut store = Store::from(original.clone());
        let mut tags: Store<usize> = (0..len).collect();

        let (lt, gt) = trisect_tagged_by(
            &mut store,
            1,
            len as Index,
            Some(&pivot),
            |a, b| a.0 < b.0,
            &mut tags,
        )
        .unwrap();

        let items: Vec<(i32, usize)> = store.iter().flatten().copied().collect();
        for (i, item) in items.iter().enumerate() {
            let pos = i as Index + 1;
            let zone = if pos <= lt {
                Ordering::Less
            } else if pos < gt {
                Ordering::Equal
            } else {
                Ordering::Greater
            };
            assert_eq!(item.0.cmp(&pivot.0), zone);
        }

        for (item, tag) in items.iter().zip(tags.iter()) {
            assert_eq!(*item, original[*tag.unwrap()]);
        }
    }
}

#[test]
fn test_scalar_is_always_compatible() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..ITERS {
        let rank = match rng.u8(0..3) {
            0 => Rank::Scalar,
            1 => Rank::Vector { len: rng.usize(0..10) },
            _ => Rank::Matrix {
                rows: rng.usize(1..5),
                cols: rng.usize(1..5),
            },
        };
        for mode in [Mode::Elementwise, Mode::Product] {
            assert!(conformance(Rank::Scalar, rank, mode).is_compatible());
            assert!(conformance(rank, Rank::Scalar, mode).is_compatible());
        }
    }
}

#[test]
fn test_engines_together() {
    // Build a 2x3 matrix of ones, add a scalar to it and read it back
    // transposed.
    let ones = rho(Some(1), &[2, 3]).unwrap();
    let sum = both(|a: &i32, b: &i32| a + b, &Value::from(ones), &Value::Scalar(4), false, true)
        .unwrap();
    assert_eq!(sum.rank(), Rank::Matrix { rows: 2, cols: 3 });

    let sum = sum.into_array().unwrap();
    let mut transposed = Store::new();
    transpose(sum.store(), 2, 3, &mut transposed).unwrap();
    assert_eq!(get_range(&transposed, 6, 1).unwrap(), vec![Some(5); 6]);

    assert!(!compatible(&Value::from([1, 2]), &Value::from([1, 2, 3]), Mode::Elementwise)
        .is_compatible());
}
