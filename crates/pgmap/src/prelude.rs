//! Convenient imports for typical `pgmap` usage.
//!
//! ```ignore
//! use pgmap::prelude::*;
//! ```

pub use crate::{
    Executor, MapConfig, MapError, MapResult, Mapper, Naming, Record, RowCursor, Statement,
    ToValue, Value,
};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
