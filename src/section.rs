use regex::Regex;

/// A hand history split into indexed text fragments.
///
/// Splitting on the room's delimiter pattern turns section markers into empty
/// fragments (two delimiter matches back to back). The indices of those empty
/// fragments demarcate the document's macro-regions: everything before the
/// first boundary is the header/pre-action region, the last boundary starts
/// the summary, and the boundaries in between separate betting rounds.
///
/// Splitting is pure and total: malformed input still splits, it just leaves
/// markers that later stages fail to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    fragments: Vec<String>,
    boundaries: Vec<usize>,
}

impl Sections {
    pub fn split(raw: &str, delimiter: &Regex) -> Self {
        let fragments: Vec<String> = delimiter.split(raw).map(str::to_owned).collect();
        let boundaries = fragments
            .iter()
            .enumerate()
            .filter(|(_, fragment)| fragment.is_empty())
            .map(|(index, _)| index)
            .collect();
        Self { fragments, boundaries }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragment(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Indices of the empty fragments, in order.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Boundary before the first betting round (start of HOLE CARDS).
    pub fn first_boundary(&self) -> Option<usize> {
        self.boundaries.first().copied()
    }

    /// Boundary before the summary region.
    pub fn last_boundary(&self) -> Option<usize> {
        self.boundaries.last().copied()
    }

    /// Index of the fragment exactly equal to `marker`, e.g. `"FLOP"`.
    pub fn position(&self, marker: &str) -> Option<usize> {
        self.fragments.iter().position(|fragment| fragment == marker)
    }

    /// First boundary strictly after `index`.
    pub fn next_boundary_after(&self, index: usize) -> Option<usize> {
        self.boundaries.iter().copied().find(|&b| b > index)
    }
}
