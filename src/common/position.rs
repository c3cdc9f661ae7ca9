use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Represents a point in space, in environment units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

// Equality is only reflexive for coordinates that aren't NaN. Values read from the host never are.
impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Adding 0.0 folds -0.0 into 0.0, which compare equal.
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
        (self.z + 0.0).to_bits().hash(state);
    }
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(position: &Position) -> u64 {
        let mut hasher = DefaultHasher::new();
        position.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn signed_zero_hashes_the_same() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(-0.0, 0.0, -0.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn exact_comparison() {
        let a = Position::new(1.0, 2.0, 3.0);
        let b = Position::new(1.0, 2.0, 3.0001);
        assert_ne!(a, b);
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        let position = Position::new(f32::NAN, 0.0, 0.0);
        assert_ne!(position, position);
    }
}
