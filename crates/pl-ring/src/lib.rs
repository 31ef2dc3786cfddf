//! `pl-ring` — the closed loop of pallet stops and the pallets riding it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`stop`]   | `PalletStop` — occupancy, dwell and empty timers, completion latch |
//! | [`pallet`] | `Pallet`, `PalletState` — resident or in transit                |
//! | [`ring`]   | `Ring` — status pass, release eligibility, clearing interlock   |
//! | [`error`]  | `RingError`, `RingResult<T>`                                    |
//!
//! # Movement model
//!
//! 1. A stop that is `process_complete` may release when its downstream
//!    neighbour has been empty for strictly longer than the clearing time.
//! 2. The pallet goes in transit at the release tick; the stop clears.
//! 3. On a later status pass, once `now ≥ since + transit(destination)`, the
//!    pallet lands at the destination stop, whose dwell restarts at zero.

pub mod error;
pub mod pallet;
pub mod ring;
pub mod stop;


pub use error::{RingError, RingResult};
pub use pallet::{Pallet, PalletState};
pub use ring::{Arrival, Release, Ring};
pub use stop::PalletStop;
