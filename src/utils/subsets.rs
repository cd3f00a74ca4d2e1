use crate::errors::PreconditionError;

/// Order in which [`visit_subsets_in_order`] enumerates the subsets, interpreting
/// the inclusion vector as a binary number with index 0 as least significant bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumerationOrder {
    /// From the empty set (0) up to the full set (2^n - 1)
    #[default]
    Ascending,
    /// From the full set (2^n - 1) down to the empty set (0)
    Descending,
}

/// Largest number of elements whose subsets can be enumerated. Beyond it the number
/// of subsets does not fit into a `u64`.
pub const MAX_SUBSET_ELEMENTS: u32 = 63;

/// Calls `visitor` once for each of the 2^n subsets of `{0, .., n-1}` in ascending order.
/// See [`visit_subsets_in_order`].
pub fn visit_subsets<F>(n: u32, visitor: F) -> Result<(), PreconditionError>
where
    F: FnMut(&[bool]),
{
    visit_subsets_in_order(n, EnumerationOrder::Ascending, visitor)
}

/// Calls `visitor` once for each of the 2^n subsets of `{0, .., n-1}`. A subset is
/// handed over as inclusion vector where `vector[i]` is bit `i` of the enumerated number.
/// The vector is overwritten between calls; copy it to keep it.
///
/// `n = 0` yields a single call with the empty vector.
pub fn visit_subsets_in_order<F>(
    n: u32,
    order: EnumerationOrder,
    mut visitor: F,
) -> Result<(), PreconditionError>
where
    F: FnMut(&[bool]),
{
    if n > MAX_SUBSET_ELEMENTS {
        return Err(PreconditionError::TooManyElements { elements: n });
    }

    // Ascending counts up from all-zero, descending counts down from all-one.
    // Both are the same binary counter: flip the trailing run of `carry` bits
    // and the first bit after it.
    let carry = order == EnumerationOrder::Descending;
    let mut subset = vec![carry; n as usize];

    for _ in 0..(1u64 << n) {
        visitor(&subset);

        for bit in subset.iter_mut() {
            *bit = !*bit;
            if *bit != carry {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use std::collections::HashSet;

    fn as_number(subset: &[bool]) -> u32 {
        subset.iter().rev().fold(0, |x, &b| (x << 1) + b as u32)
    }

    fn collect(n: u32, order: EnumerationOrder) -> Vec<u32> {
        let mut numbers = Vec::new();
        visit_subsets_in_order(n, order, |s| numbers.push(as_number(s))).unwrap();
        numbers
    }

    #[test]
    fn visits_every_subset_once() {
        let numbers = collect(3, EnumerationOrder::Ascending);
        let distinct: HashSet<u32> = numbers.iter().copied().collect();

        assert_eq!(numbers.len(), 8);
        assert_eq!(distinct.len(), 8);
        for i in 0..8 {
            assert!(distinct.contains(&i));
        }
    }

    #[test]
    fn small_to_large() {
        assert_eq!(
            collect(3, EnumerationOrder::Ascending),
            (0..8).collect_vec()
        );

        let mut numbers = Vec::new();
        visit_subsets(3, |s| numbers.push(as_number(s))).unwrap();
        assert_eq!(numbers, (0..8).collect_vec());
    }

    #[test]
    fn large_to_small() {
        assert_eq!(
            collect(3, EnumerationOrder::Descending),
            (0..8).rev().collect_vec()
        );
    }

    #[test]
    fn bit_zero_is_first_entry() {
        let mut subsets = Vec::new();
        visit_subsets(2, |s| subsets.push(s.to_vec())).unwrap();
        assert_eq!(
            subsets,
            [
                vec![false, false],
                vec![true, false],
                vec![false, true],
                vec![true, true]
            ]
        );
    }

    #[test]
    fn empty_ground_set() {
        for order in [EnumerationOrder::Ascending, EnumerationOrder::Descending] {
            let mut calls = 0;
            visit_subsets_in_order(0, order, |s| {
                assert!(s.is_empty());
                calls += 1;
            })
            .unwrap();
            assert_eq!(calls, 1);
        }
    }

    #[test]
    fn larger_counts() {
        for n in [1, 5, 10] {
            for order in [EnumerationOrder::Ascending, EnumerationOrder::Descending] {
                let numbers = collect(n, order);
                assert_eq!(numbers.len(), 1 << n);
                assert!(numbers.iter().tuple_windows().all(|(a, b)| match order {
                    EnumerationOrder::Ascending => a < b,
                    EnumerationOrder::Descending => a > b,
                }));
            }
        }
    }

    #[test]
    fn rejects_too_many_elements() {
        assert_eq!(
            visit_subsets(64, |_| panic!("must not be called")),
            Err(PreconditionError::TooManyElements { elements: 64 })
        );
    }
}
