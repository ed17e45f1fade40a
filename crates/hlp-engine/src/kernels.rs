use hlp_core::{Label, MAX_LABELS_CAP};

/// Fixed-size label histogram; lives on the stack in every kernel tier.
pub(crate) type Histogram = [u32; MAX_LABELS_CAP];

/// Tallies the labels of the referenced entities into a histogram.
/// Out-of-range labels are ignored.
pub(crate) fn tally(slice: &[u32], labels: &[Label], max_labels: usize) -> Histogram {
    let mut counts = [0u32; MAX_LABELS_CAP];
    for &entity in slice {
        let label = labels[entity as usize];
        if label >= 0 && (label as usize) < max_labels {
            counts[label as usize] += 1;
        }
    }
    counts
}

/// Merges two partial histograms.
pub(crate) fn merge(mut left: Histogram, right: &Histogram) -> Histogram {
    for (acc, count) in left.iter_mut().zip(right.iter()) {
        *acc += count;
    }
    left
}

/// Selects the argmax label from a histogram.
///
/// The scan is seeded with the incumbent and its count and replaces only on
/// strictly greater counts, so the lowest label index wins ties among
/// challengers and the incumbent survives any tie. When the incumbent is out
/// of range its seed count is zero; if every tallied label is out of range
/// the incumbent is returned unchanged.
pub(crate) fn select_label(counts: &Histogram, incumbent: Label, max_labels: usize) -> Label {
    let mut best = incumbent;
    let mut best_count = if incumbent >= 0 && (incumbent as usize) < max_labels {
        counts[incumbent as usize]
    } else {
        0
    };
    for (label, &count) in counts[..max_labels].iter().enumerate() {
        if count > best_count {
            best_count = count;
            best = label as Label;
        }
    }
    best
}
