// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The five affine maps that together define the tree.
//!
//! Each map takes a point on the real plane, multiplies it by a 2x2
//! matrix and adds a translation.  Two of the maps squash everything
//! into the trunk, one makes a slightly shrunken, slightly rotated
//! copy of the whole tree sitting on top of the trunk, and the last
//! two throw a copy out to the left and to the right to make the
//! branches.

use num::Complex;

/// We don't need a Point struct, as a single Complex number is a
/// Point: the real part is x, the imaginary part is y.
pub type Point = Complex<f64>;

/// What part of the tree a transform draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// The lower half of the trunk.
    TrunkA,
    /// The upper half of the trunk.
    TrunkB,
    /// The whole tree, shrunk and stacked on top of itself.
    SelfCopy,
    /// The branch thrown to the left.
    LeftBranch,
    /// The branch thrown to the right.
    RightBranch,
}

/// `point -> matrix . point + translation`.  Immutable once built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineTransform {
    /// Row-major 2x2 matrix.
    pub matrix: [[f64; 2]; 2],
    /// Added after the matrix product.
    pub translation: Point,
}

impl AffineTransform {
    /// Builds a transform from its matrix rows and translation.
    pub const fn new(matrix: [[f64; 2]; 2], translation: (f64, f64)) -> Self {
        AffineTransform {
            matrix,
            translation: Complex {
                re: translation.0,
                im: translation.1,
            },
        }
    }

    /// Maps a point.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let m = &self.matrix;
        Complex {
            re: m[0][0] * p.re + m[0][1] * p.im + self.translation.re,
            im: m[1][0] * p.re + m[1][1] * p.im + self.translation.im,
        }
    }
}

/// Index of the left branch transform; the right branch follows it.
pub const LEFT_BRANCH: usize = 3;
/// Index of the right branch transform.
pub const RIGHT_BRANCH: usize = 4;

/// The ordered set of transforms, each tagged with the role it plays.
/// There is no way to change one after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformTable {
    entries: [(Role, AffineTransform); 5],
}

impl TransformTable {
    /// The tree.
    pub fn barnsley_tree() -> Self {
        TransformTable {
            entries: [
                (
                    Role::TrunkA,
                    AffineTransform::new([[0.1, 0.0], [0.0, 0.2]], (0.0, 0.3)),
                ),
                (
                    Role::TrunkB,
                    AffineTransform::new([[0.1, 0.0], [0.0, 0.2]], (0.0, 0.37)),
                ),
                (
                    Role::SelfCopy,
                    AffineTransform::new([[0.87, 0.01], [-0.01, 0.87]], (0.0, 0.8)),
                ),
                (
                    Role::LeftBranch,
                    AffineTransform::new([[0.30, -0.3], [0.70, -0.2]], (0.0, 0.3)),
                ),
                (
                    Role::RightBranch,
                    AffineTransform::new([[-0.30, 0.3], [0.70, -0.2]], (0.0, 0.3)),
                ),
            ],
        }
    }

    /// The transform at `index`.  Panics past the fifth entry, which
    /// the sampler can never ask for.
    #[inline]
    pub fn get(&self, index: usize) -> &AffineTransform {
        &self.entries[index].1
    }

    /// The role of the transform at `index`.
    pub fn role(&self, index: usize) -> Role {
        self.entries[index].0
    }

    /// Walks the table in index order.
    pub fn iter(&self) -> impl Iterator<Item = &(Role, AffineTransform)> {
        self.entries.iter()
    }
}

impl Default for TransformTable {
    fn default() -> Self {
        TransformTable::barnsley_tree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_role_order() {
        let table = TransformTable::barnsley_tree();
        let roles: Vec<Role> = table.iter().map(|e| e.0).collect();
        assert_eq!(
            roles,
            vec![
                Role::TrunkA,
                Role::TrunkB,
                Role::SelfCopy,
                Role::LeftBranch,
                Role::RightBranch
            ]
        );
        assert_eq!(table.role(LEFT_BRANCH), Role::LeftBranch);
        assert_eq!(table.role(RIGHT_BRANCH), Role::RightBranch);
    }

    #[test]
    fn origin_maps_to_translation() {
        let table = TransformTable::barnsley_tree();
        for (_, t) in table.iter() {
            assert_eq!(t.apply(Complex::new(0.0, 0.0)), t.translation);
        }
    }

    #[test]
    fn apply_multiplies_then_translates() {
        let t = AffineTransform::new([[1.0, 2.0], [3.0, 4.0]], (0.5, -0.5));
        assert_eq!(t.apply(Complex::new(1.0, 1.0)), Complex::new(3.5, 6.5));
    }

    #[test]
    fn branches_mirror_each_other() {
        let table = TransformTable::barnsley_tree();
        let p = Complex::new(0.25, 4.0);
        let left = table.get(LEFT_BRANCH).apply(p);
        let right = table.get(RIGHT_BRANCH).apply(p);
        assert!((left.re + right.re).abs() < 1e-12);
        assert!((left.im - right.im).abs() < 1e-12);
    }
}
