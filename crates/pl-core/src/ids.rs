//! Strongly typed, zero-cost identifier wrappers.
//!
//! Arena ids (`PalletId`, `RobotId`, …) are zero-based indices into the
//! owning `Vec`.  Ring positions are different: they are the 1-based ordinals
//! used on the shop floor, so [`Position`] gets its own type with explicit
//! wrap-around helpers instead of the generic macro.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a pallet in the ring's pallet arena.
    pub struct PalletId(u32);
}

typed_id! {
    /// Index of a robot in the simulation's robot arena.
    pub struct RobotId(u16);
}

typed_id! {
    /// Index of a parts feeder (tray or shuttle).
    pub struct FeederId(u16);
}

typed_id! {
    /// Index of a vision controller.
    pub struct VisionId(u16);
}

typed_id! {
    /// Camera number reported to a vision controller when an inspection starts.
    pub struct CameraId(u16);
}

typed_id! {
    /// Index of a program in one robot's program table.
    pub struct ProgramId(u16);
}

// ── Position ──────────────────────────────────────────────────────────────────

/// A 1-based ordinal on the ring.  Ordinal `N` is followed by ordinal `1`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position(pub u16);

impl Position {
    pub const FIRST: Position = Position(1);

    /// Zero-based index into the stop arena.
    ///
    /// # Panics
    /// Panics in debug mode for the invalid ordinal `0`.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Inverse of [`index`][Self::index].
    #[inline]
    pub fn from_index(index: usize) -> Position {
        Position(index as u16 + 1)
    }

    /// The downstream neighbour on a ring of `len` stops.
    #[inline]
    pub fn next(self, len: usize) -> Position {
        if self.0 as usize >= len { Position::FIRST } else { Position(self.0 + 1) }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
