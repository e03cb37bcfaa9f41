use serde::{Deserialize, Serialize};

/// Spin projection of a single orbital, stored as ±1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// Order in which spin partners are emitted: up, then down.
    pub const ORDER: [Spin; 2] = [Spin::Up, Spin::Down];

    pub fn value(self) -> i8 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }
}

impl From<Spin> for i8 {
    fn from(spin: Spin) -> Self {
        spin.value()
    }
}

impl TryFrom<i8> for Spin {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Spin::Up),
            -1 => Ok(Spin::Down),
            other => Err(format!("spin must be +1 or -1, got {other}")),
        }
    }
}

/// One orbital of the basis.
///
/// The meaning of the two quantum numbers depends on the coordinate scheme the
/// basis was enumerated with:
///
/// | scheme       | `first`    | `second`             |
/// |--------------|------------|----------------------|
/// | Cartesian 1D | n          | 0                    |
/// | Cartesian 2D | nx         | ny                   |
/// | Polar 2D     | n (radial) | m (angular momentum) |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleParticleState {
    /// Position of this state in the enumeration order
    pub index: usize,
    pub first: i32,
    pub second: i32,
    pub spin: Spin,
}

impl SingleParticleState {
    pub const fn new(index: usize, first: i32, second: i32, spin: Spin) -> Self {
        Self {
            index,
            first,
            second,
            spin,
        }
    }

    /// The `(index, first, second, spin)` tuple handed to downstream consumers.
    pub fn as_tuple(&self) -> (usize, i32, i32, i8) {
        (self.index, self.first, self.second, self.spin.value())
    }
}

impl std::fmt::Display for SingleParticleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>4}: ({:>3}, {:>3}, {:+})",
            self.index,
            self.first,
            self.second,
            self.spin.value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_serializes_as_signed_integer() {
        let state = SingleParticleState::new(3, 1, -2, Spin::Down);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"index":3,"first":1,"second":-2,"spin":-1}"#);

        let back: SingleParticleState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn invalid_spin_is_rejected() {
        let result = serde_json::from_str::<SingleParticleState>(
            r#"{"index":0,"first":0,"second":0,"spin":0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn tuple_view() {
        assert_eq!(
            SingleParticleState::new(1, 0, 0, Spin::Down).as_tuple(),
            (1, 0, 0, -1)
        );
    }
}
