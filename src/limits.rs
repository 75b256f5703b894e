use std::sync::OnceLock;

use crate::env::{env_flag, env_usize};
use crate::errors::KernelError;

/// Environment variable which overrides [`Limits::max_range_len`].
pub const MAX_RANGE_LEN_VAR: &str = "APL_MAX_RANGE_LEN";

/// Environment variable which enables trace logging of the strategy chosen
/// by [`move_range`](crate::move_range).
pub const TRACE_MOVES_VAR: &str = "APL_TRACE_MOVES";

/// Options that bound the resources used by operations which materialize
/// new sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of elements that `get`, `rho` or `iota` may produce
    /// in one call, and the highest index that `set`, `move` or `transpose`
    /// may write.
    pub max_range_len: usize,

    /// Whether to log which copy strategy each range move uses.
    pub trace_moves: bool,
}

impl Limits {
    pub const DEFAULT_MAX_RANGE_LEN: usize = 1_000_000;

    /// Read limits from the environment, falling back to defaults for
    /// variables which are unset or malformed.
    pub fn from_env() -> Limits {
        Limits {
            max_range_len: env_usize(MAX_RANGE_LEN_VAR, Self::DEFAULT_MAX_RANGE_LEN),
            trace_moves: env_flag(TRACE_MOVES_VAR, false),
        }
    }

    /// Return the process-wide limits, read from the environment on first use.
    pub fn global() -> &'static Limits {
        static GLOBAL: OnceLock<Limits> = OnceLock::new();
        GLOBAL.get_or_init(Limits::from_env)
    }

    /// Fail with [`KernelError::CapacityExceeded`] if `requested` elements
    /// exceed the budget.
    pub fn check_len(&self, requested: usize) -> Result<(), KernelError> {
        if requested > self.max_range_len {
            log::debug!(
                "rejecting materialization of {} elements (limit {})",
                requested,
                self.max_range_len
            );
            return Err(KernelError::CapacityExceeded {
                requested,
                limit: self.max_range_len,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_range_len: Self::DEFAULT_MAX_RANGE_LEN,
            trace_moves: false,
        }
    }
}
