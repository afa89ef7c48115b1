//! Single-line compaction.

/// Outcome of compacting one row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    /// The compacted line, same length as the input.
    pub line: Vec<u32>,
    /// Whether any position changed.
    pub moved: bool,
    /// Sum of the values produced by merges.
    pub score_gain: u64,
}

/// Compact a line towards index 0.
///
/// Zeros are squeezed out, then equal neighbours are merged scanning from
/// the front. A merged value is never merged again in the same pass, so
/// `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` rather than `[4, 2]` collapsing
/// further. Other directions reverse the line around this call.
#[must_use]
pub fn compact_line(line: &[u32]) -> LineResult {
    let dense: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut out = Vec::with_capacity(line.len());
    let mut score_gain = 0u64;
    let mut i = 0;
    while i < dense.len() {
        let value = dense[i];
        // checked_mul keeps a 2^31 pair from wrapping; such a pair simply stays put
        let merged = dense
            .get(i + 1)
            .filter(|&&next| next == value)
            .and_then(|_| value.checked_mul(2));

        if let Some(doubled) = merged {
            out.push(doubled);
            score_gain += u64::from(doubled);
            i += 2;
        } else {
            out.push(value);
            i += 1;
        }
    }
    out.resize(line.len(), 0);

    let moved = out.as_slice() != line;
    LineResult {
        line: out,
        moved,
        score_gain,
    }
}
