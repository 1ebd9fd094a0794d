//! Utility functions for the assignment-based methods.

use ged_core::LabelId;

/// Sorts a label sequence in place with a counting sort over the value
/// range of the slice.
///
/// Runs in `O(d + L)` for `d` labels spanning `L` distinct values, which
/// beats a comparison sort when the edge label alphabet is small and fixed.
/// The [`DUMMY_LABEL`](ged_core::DUMMY_LABEL) sentinel sorts last, matching
/// its `Ord` position.
pub fn counting_sort(labels: &mut [LabelId]) {
    // The sentinel sits at the top of the u32 range; bucketing it would
    // blow the count table up to the full alphabet span. Partition it out
    // and fill it back in at the end, where Ord places it anyway.
    let mut write = 0;
    let mut num_dummies = 0;
    for read in 0..labels.len() {
        if labels[read].is_dummy() {
            num_dummies += 1;
        } else {
            labels[write] = labels[read];
            write += 1;
        }
    }
    let (real, dummies) = labels.split_at_mut(write);
    dummies.fill(ged_core::DUMMY_LABEL);
    debug_assert_eq!(dummies.len(), num_dummies);

    let Some(&first) = real.first() else {
        return;
    };
    let (min, max) = real.iter().fold((first, first), |(min, max), &label| {
        (min.min(label), max.max(label))
    });

    let offset = u32::from(min) as usize;
    let span = u32::from(max) as usize - offset + 1;
    let mut counts = vec![0usize; span];
    for &label in real.iter() {
        counts[u32::from(label) as usize - offset] += 1;
    }

    let mut write = 0;
    for (bucket, &count) in counts.iter().enumerate() {
        let label = LabelId::new((bucket + offset) as u32);
        for _ in 0..count {
            real[write] = label;
            write += 1;
        }
    }
}
