//! # Cycloid
//!
//! Cycloid is a Rust library for permutations as first-class values: build
//! one from a ranking, from cycle notation, or from "whatever sorts this" or
//! "whatever turns this into that", then compose, invert and apply it.
//!
//! The main types are
//! - [`Permutation`]: immutable, validated, applied without touching its input,
//! - [`Cycles`]: the same permutation as disjoint cycles, applied in place to
//!   any [`Swap`] buffer,
//! - [`Transposition`]: a single swap, optionally shared through a
//!   [`TranspositionCache`].
//!
//! The raw algorithms on index arrays live in [`ranking`], including the
//! enumeration of every permutation of a given size.
//!
//! ```
//! use cycloid::Permutation;
//!
//! let names = ["carol", "alice", "bob"];
//! let ages = [35, 30, 41];
//! let by_name = Permutation::sorting(&names);
//! assert_eq!(by_name.apply_slice(&ages).unwrap(), vec![30, 41, 35]);
//! assert_eq!(by_name.invert().apply_slice(&by_name.apply_slice(&ages).unwrap()).unwrap(), ages);
//! ```

pub mod array_util;
pub mod cycles;
pub mod error;
pub mod permutation;
pub mod ranking;
pub mod swap;
pub mod transposition;

pub use cycles::Cycles;
pub use error::PermutationError;
pub use permutation::{Permutation, Taking};
pub use swap::Swap;
pub use transposition::{Transposition, TranspositionCache};
