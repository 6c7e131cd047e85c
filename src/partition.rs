//! Splitting an ordered file list into contiguous, numbered buckets.

use crate::error::PlanError;

/// How the partition parameter should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Parameter is the maximum number of files per bucket.
    BySize(usize),
    /// Parameter is the number of buckets to create.
    ByCount(usize),
}

/// One output subdirectory and the files assigned to it, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<T> {
    pub name: String,
    pub items: Vec<T>,
}

/// Partition `items` into buckets.
///
/// `BySize(s)` creates `ceil(n / s)` buckets, so an empty input produces none.
/// `ByCount(c)` always creates exactly `c` buckets of `ceil(n / c)` files,
/// trailing ones possibly empty. Item `i` lands in bucket `i / size`.
pub fn plan<T: Clone>(items: &[T], mode: Mode) -> Result<Vec<Bucket<T>>, PlanError> {
    let n = items.len();
    let (count, size) = match mode {
        Mode::BySize(0) => return Err(PlanError::ZeroBucketSize),
        Mode::ByCount(0) => return Err(PlanError::ZeroBucketCount),
        Mode::BySize(size) => (n.div_ceil(size), size),
        Mode::ByCount(count) => (count, n.div_ceil(count)),
    };

    let width = name_width(count);
    let buckets = (0..count)
        .map(|index| {
            let start = (index * size).min(n);
            let end = ((index + 1) * size).min(n);
            Bucket {
                name: bucket_name(index, width),
                items: items[start..end].to_vec(),
            }
        })
        .collect();
    Ok(buckets)
}

/// Digits needed for the largest index of `count` buckets, at least one.
pub fn name_width(count: usize) -> usize {
    count
        .saturating_sub(1)
        .checked_ilog10()
        .map_or(1, |d| d as usize + 1)
}

pub fn bucket_name(index: usize, width: usize) -> String {
    format!("{:0width$}", index, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    fn sizes(buckets: &[Bucket<String>]) -> Vec<usize> {
        buckets.iter().map(|b| b.items.len()).collect()
    }

    #[test]
    fn by_size_ten_into_threes() {
        let buckets = plan(&files(10), Mode::BySize(3)).unwrap();
        assert_eq!(sizes(&buckets), vec![3, 3, 3, 1]);
        let names: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn by_size_exact_multiple() {
        let buckets = plan(&files(9), Mode::BySize(3)).unwrap();
        assert_eq!(sizes(&buckets), vec![3, 3, 3]);
    }

    #[test]
    fn by_size_shape_holds_for_many_inputs() {
        for n in 0..40 {
            for size in 1..12 {
                let buckets = plan(&files(n), Mode::BySize(size)).unwrap();
                assert_eq!(buckets.len(), n.div_ceil(size));
                if let Some((last, rest)) = buckets.split_last() {
                    assert!(rest.iter().all(|b| b.items.len() == size));
                    let expected = if n % size == 0 { size } else { n % size };
                    assert_eq!(last.items.len(), expected);
                }
            }
        }
    }

    #[test]
    fn by_count_is_complete_ordered_cover() {
        for n in 0..40 {
            for count in 1..12 {
                let input = files(n);
                let buckets = plan(&input, Mode::ByCount(count)).unwrap();
                assert_eq!(buckets.len(), count);
                let flat: Vec<String> = buckets.into_iter().flat_map(|b| b.items).collect();
                assert_eq!(flat, input);
            }
        }
    }

    #[test]
    fn by_count_more_buckets_than_files() {
        let buckets = plan(&files(3), Mode::ByCount(5)).unwrap();
        assert_eq!(sizes(&buckets), vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn empty_input() {
        assert!(plan(&files(0), Mode::BySize(4)).unwrap().is_empty());
        let buckets = plan(&files(0), Mode::ByCount(3)).unwrap();
        assert_eq!(sizes(&buckets), vec![0, 0, 0]);
    }

    #[test]
    fn zero_parameter_rejected() {
        assert_eq!(
            plan(&files(3), Mode::BySize(0)),
            Err(PlanError::ZeroBucketSize)
        );
        assert_eq!(
            plan(&files(3), Mode::ByCount(0)),
            Err(PlanError::ZeroBucketCount)
        );
    }

    #[test]
    fn name_width_at_powers_of_ten() {
        assert_eq!(name_width(1), 1);
        assert_eq!(name_width(2), 1);
        assert_eq!(name_width(10), 1);
        assert_eq!(name_width(11), 2);
        assert_eq!(name_width(100), 2);
        assert_eq!(name_width(101), 3);
    }

    #[test]
    fn names_are_uniform_and_increasing() {
        let buckets = plan(&files(0), Mode::ByCount(12)).unwrap();
        let names: Vec<_> = buckets.iter().map(|b| b.name.clone()).collect();
        assert_eq!(names.first().unwrap(), "00");
        assert_eq!(names.last().unwrap(), "11");
        assert!(names.iter().all(|n| n.len() == 2));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
