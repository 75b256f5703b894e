//! Internal testing utilities for the apl-kernel crates.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

/// Utility for creating table-driven tests.
///
/// Define a `Debug` struct, conventionally named `Case`, holding the inputs
/// and expected output of one check, build a collection of them and call
/// `test_each` with the check to run. Every case is run even if an earlier
/// one fails; the panic message lists all failing cases.
///
/// ```
/// use apl_testing::TestCases;
///
/// #[derive(Debug)]
/// struct Case {
///     lo: isize,
///     hi: isize,
///     count: usize,
/// }
///
/// let cases = [
///     Case { lo: 1, hi: 4, count: 4 },
///     Case { lo: 4, hi: 1, count: 4 },
///     Case { lo: 2, hi: 2, count: 1 },
/// ];
///
/// cases.test_each(|&Case { lo, hi, count }| {
///     assert_eq!((hi - lo).unsigned_abs() + 1, count);
/// });
/// ```
///
/// Cases and the test closure must be unwind safe. Fields which are not
/// (eg. values with interior mutability) are best replaced by a description
/// of how to build the value inside the test closure.
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call `test` with a reference to each case, catching panics, then panic
    /// if any case failed.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Variant of [`test_each`](TestCases::test_each) which passes cases by
    /// value. Each case is formatted before the call so it can be reported
    /// on failure.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let failures: Vec<_> = self
            .into_iter()
            .filter(|case| std::panic::catch_unwind(|| test(case)).is_err())
            .collect();
        report(&failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let test = &test;
            let desc = format!("{:?}", case);
            if std::panic::catch_unwind(move || test(case)).is_err() {
                failures.push(desc);
            }
        }
        report(&failures);
    }
}

fn report<C: Debug>(failures: &[C]) {
    assert_eq!(
        failures.len(),
        0,
        "{} test cases failed: {:?}",
        failures.len(),
        failures
    );
}

/// Iterator over every permutation of a sequence, in the order produced by
/// Heap's algorithm. The first item is the input itself.
pub struct Permutations<T> {
    items: Vec<T>,
    counters: Vec<usize>,
    depth: usize,
    started: bool,
}

impl<T: Clone> Permutations<T> {
    pub fn new(items: Vec<T>) -> Self {
        let len = items.len();
        Permutations {
            items,
            counters: vec![0; len],
            depth: 1,
            started: false,
        }
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if !self.started {
            self.started = true;
            return Some(self.items.clone());
        }
        while self.depth < self.items.len() {
            let i = self.depth;
            if self.counters[i] < i {
                let swap_with = if i % 2 == 0 { 0 } else { self.counters[i] };
                self.items.swap(swap_with, i);
                self.counters[i] += 1;
                self.depth = 1;
                return Some(self.items.clone());
            }
            self.counters[i] = 0;
            self.depth += 1;
        }
        None
    }
}

/// Return true if no element of `items` is preceded by its successor
/// according to `precedes`.
pub fn is_sorted_by<T>(items: &[T], mut precedes: impl FnMut(&T, &T) -> bool) -> bool {
    items.windows(2).all(|w| !precedes(&w[1], &w[0]))
}
