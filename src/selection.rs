/// Ordered, duplicate-free set of catalog indices. Insertion order is selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.indices.contains(&idx)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Appends `idx` unless already present. Returns whether the set changed.
    pub fn insert(&mut self, idx: usize) -> bool {
        if self.contains(idx) {
            return false;
        }
        self.indices.push(idx);
        true
    }

    /// Removes `idx` keeping the order of the rest. Returns whether the set changed.
    pub fn remove(&mut self, idx: usize) -> bool {
        let Some(pos) = self.indices.iter().position(|i| *i == idx) else {
            return false;
        };
        self.indices.remove(pos);
        true
    }
}
