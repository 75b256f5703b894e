//! apl-kernel provides the array primitives of an APL-style interpreter.
//!
//! Arrays are held in a [`Store`], a sparse mapping from 1-based indices to
//! values. The kernel is organized into three engines:
//!
//! - The range engine ([`get_range`], [`set_range`], [`move_range`],
//!   [`transpose`]) reads and writes contiguous index ranges, in either
//!   direction.
//! - The ordering engine ([`insertion_sort`], [`merge`], [`trisect`]) provides
//!   the in-place building blocks of a hybrid sort, ordered by a caller
//!   supplied precedence function.
//! - The shape and broadcast engine ([`classify`], [`compatible`], [`each`],
//!   [`both`], [`rho`], [`iota`]) classifies operands as scalars, vectors or
//!   matrices and applies functions elementwise across them.
//!
//! # Missing values
//!
//! Positions in a store may be empty. Range reads return `None` for them,
//! broadcasts propagate them, and the ordering engine rejects ranges which
//! contain them.
//!
//! # Limits
//!
//! Operations which allocate a range check its length against
//! [`Limits::max_range_len`], and operations which write to a store check
//! the highest index they write against it. The process-wide limits are
//! read from the environment on first use, see [`Limits::from_env`]. The
//! `*_with` variants of each operation accept explicit limits.
//!
//! # Logging
//!
//! The kernel logs through the [`log`](https://docs.rs/log) facade. Rejected
//! operations are logged at `debug` level and individual element moves at
//! `trace` level when `APL_TRACE_MOVES` is set.

mod env;

pub mod broadcast;
pub mod construct;
pub mod errors;
pub mod limits;
pub mod ordering;
pub mod range;
pub mod shape;
pub mod shared;
pub mod store;
pub mod tuple;
pub mod value;

pub use broadcast::{both, each};
pub use construct::{iota, iota_with, rho, rho_with, FromIndex};
pub use errors::KernelError;
pub use limits::Limits;
pub use ordering::{
    insertion_sort, insertion_sort_by, merge, merge_by, trisect, trisect_by, trisect_tagged_by,
};
pub use range::{
    get_range, get_range_with, move_range, move_range_with, set_range, set_range_with, transpose,
    transpose_with,
};
pub use shape::{classify, compatible, conformance, rank_of, ArrayLike, Conformance, Mode, Rank};
pub use shared::{transpose_shared, trisect_shared, SharedStore};
pub use store::{Index, Store};
pub use tuple::{map, pick, Mapper};
pub use value::{Array, ShapeMeta, Value};
