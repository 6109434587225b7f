/// A position in the host's world space.
///
/// The registry never interprets coordinates, it only hands them to the [`Host`][crate::Host].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Vec3 {
    /// The X coordinate.
    pub x: f32,
    /// The Y coordinate.
    pub y: f32,
    /// The Z coordinate.
    pub z: f32,
}

impl Vec3 {
    /// Creates a position from its three coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// An orientation in the host's world space, as a quaternion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct Quat {
    /// The X component of the vector part.
    pub x: f32,
    /// The Y component of the vector part.
    pub y: f32,
    /// The Z component of the vector part.
    pub z: f32,
    /// The scalar part.
    pub w: f32,
}

impl Quat {
    /// The rotation that leaves an object as it is.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Where to put an instance as it is taken out of its pool.
///
/// # Example
///
/// ```rust
/// use prototype_pool::{Placement, Quat, Vec3};
///
/// let at = Placement::Position(Vec3::new(1.0, 2.0, 3.0));
/// assert_eq!(at.position(), Vec3::new(1.0, 2.0, 3.0));
/// assert_eq!(at.rotation(), None);
///
/// let turned = Placement::PositionRotation(Vec3::default(), Quat::IDENTITY);
/// assert_eq!(turned.rotation(), Some(Quat::IDENTITY));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Placement {
    /// Move the instance, keeping its current orientation.
    Position(Vec3),

    /// Move and rotate the instance.
    PositionRotation(Vec3, Quat),
}

impl Placement {
    /// The position this placement moves an instance to.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        match *self {
            Self::Position(position) | Self::PositionRotation(position, _) => position,
        }
    }

    /// The orientation this placement sets, if any.
    #[must_use]
    pub fn rotation(&self) -> Option<Quat> {
        match *self {
            Self::Position(_) => None,
            Self::PositionRotation(_, rotation) => Some(rotation),
        }
    }
}

impl From<Vec3> for Placement {
    fn from(position: Vec3) -> Self {
        Self::Position(position)
    }
}

impl From<(Vec3, Quat)> for Placement {
    fn from((position, rotation): (Vec3, Quat)) -> Self {
        Self::PositionRotation(position, rotation)
    }
}
