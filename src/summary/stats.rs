/// Min, mean and max of a series after optional IQR outlier removal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub removed: usize,
}

/// Summarizes `values`, sorting them in place.
///
/// With `remove_outliers`, values outside `[q1 - 1.5 iqr, q3 + 1.5 iqr]`
/// are dropped, where `q1 = v[n/4]` and `q3 = v[3n/4]`.
#[expect(clippy::float_arithmetic, reason = "mean of two samples")]
pub fn get_summary(values: &mut [f64], remove_outliers: bool) -> Summary {
    match values {
        [] => Summary::default(),
        [only] => Summary {
            min: *only,
            mean: *only,
            max: *only,
            removed: 0,
        },
        [first, second] => Summary {
            min: first.min(*second),
            mean: (*first + *second) / 2.0,
            max: first.max(*second),
            removed: 0,
        },
        _ => summarize_sorted(values, remove_outliers),
    }
}

#[expect(clippy::float_arithmetic, reason = "IQR fences are computed in f64")]
fn summarize_sorted(values: &mut [f64], remove_outliers: bool) -> Summary {
    values.sort_by(f64::total_cmp);
    let len = values.len();
    let (start, end) = if remove_outliers {
        let i25 = len / 4;
        let i75 = len.saturating_mul(3) / 4;
        let q1 = values.get(i25).copied().unwrap_or_default();
        let q3 = values.get(i75).copied().unwrap_or_default();
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        let start = bound_index(values, lower).min(i25);
        let end = bound_index(values, upper).clamp(i75, len);
        (start, end)
    } else {
        (0, len)
    };

    let kept = values.get(start..end).unwrap_or(values);
    let (Some(min), Some(max)) = (kept.first().copied(), kept.last().copied()) else {
        return Summary::default();
    };
    Summary {
        min,
        mean: mean(kept),
        max,
        removed: len.saturating_sub(kept.len()),
    }
}

/// Midpoint binary search over sorted `values`: the index of a match, or
/// the insertion point when `target` is absent.
#[must_use]
pub fn bound_index(values: &[f64], target: f64) -> usize {
    let mut lo = 0usize;
    let mut hi = values.len();
    while lo < hi {
        let mid = lo.saturating_add(hi.saturating_sub(lo).saturating_sub(1) / 2);
        let Some(value) = values.get(mid) else {
            break;
        };
        match value.total_cmp(&target) {
            std::cmp::Ordering::Equal => return mid,
            std::cmp::Ordering::Less => lo = mid.saturating_add(1),
            std::cmp::Ordering::Greater => hi = mid,
        }
    }
    lo
}

/// Arithmetic mean computed in one pass; 0 for an empty slice.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "arithmetic mean")]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for value in values {
        sum += value;
    }
    sum / values.len() as f64
}
