//! # Snapshot Testing Support
//!
//! Utilities for checking parser output and turning it into stable,
//! comparable forms.
//!
//! ## Modules
//!
//! - **`normalize`**: converts a [`ParsedDoc`](crate::parsing::ParsedDoc)
//!   into a serializable [`Snap`] (also used for JSON output) and a plain-text
//!   rendering for `insta` file snapshots
//! - **`invariants`**: runtime checks for parser correctness (spans in order
//!   and in bounds, lossless round trip, index nodes anchored on headings)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, consumed, normalize, reassemble, render};
