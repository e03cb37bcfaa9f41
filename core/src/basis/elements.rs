use serde::{Deserialize, Serialize};

/// Anything with a magnitude at or below this is treated as zero and not stored.
pub const TOLERANCE: f64 = 1e-6;

/// An antisymmetrized two-body element <pq||rs> with `p < q` and `r < s`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionElement {
    pub p: usize,
    pub q: usize,
    pub r: usize,
    pub s: usize,
    pub value: f64,
}

impl InteractionElement {
    pub fn indices(&self) -> (usize, usize, usize, usize) {
        (self.p, self.q, self.r, self.s)
    }
}

impl std::fmt::Display for InteractionElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{} {}||{} {}> = {:.8}",
            self.p, self.q, self.r, self.s, self.value
        )
    }
}

/// The sparse list of non-negligible interaction elements.
///
/// Elements are kept in the order they were computed: ascending p, then q, r, s.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionElements(Vec<InteractionElement>);

impl InteractionElements {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InteractionElement> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[InteractionElement] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<InteractionElement> {
        self.0
    }

    /// Value of the stored element with the given canonical indices, if any.
    pub fn get(&self, p: usize, q: usize, r: usize, s: usize) -> Option<f64> {
        self.0
            .iter()
            .find(|element| element.indices() == (p, q, r, s))
            .map(|element| element.value)
    }
}

impl From<Vec<InteractionElement>> for InteractionElements {
    fn from(elements: Vec<InteractionElement>) -> Self {
        Self(elements)
    }
}

impl<'a> IntoIterator for &'a InteractionElements {
    type Item = &'a InteractionElement;
    type IntoIter = std::slice::Iter<'a, InteractionElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(p: usize, q: usize, r: usize, s: usize, value: f64) -> InteractionElement {
        InteractionElement { p, q, r, s, value }
    }

    #[test]
    fn lookup_by_indices() {
        let elements = InteractionElements::from(vec![
            element(0, 1, 0, 1, 0.5),
            element(0, 2, 1, 3, -0.25),
        ]);

        assert_eq!(elements.len(), 2);
        assert_eq!(elements.get(0, 2, 1, 3), Some(-0.25));
        assert_eq!(elements.get(1, 0, 1, 0), None);
    }

    #[test]
    fn serializes_as_a_plain_list() {
        let elements = InteractionElements::from(vec![element(0, 1, 2, 3, 1.5)]);
        let json = serde_json::to_string(&elements).unwrap();
        assert_eq!(json, r#"[{"p":0,"q":1,"r":2,"s":3,"value":1.5}]"#);
    }

    #[test]
    fn display() {
        assert_eq!(
            element(0, 1, 2, 3, -1.0).to_string(),
            "<0 1||2 3> = -1.00000000"
        );
    }
}
