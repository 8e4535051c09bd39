#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::{RingBuffer, helper};
pub use utils::helper::{mean, stddev};

mod error;
pub use error::{CusumError, Result};

mod generator;
pub use generator::{BaselineGenerator, DropNonFinite, Identity};

mod config;
pub use config::CusumConfig;

mod rolling_cusum;
pub use rolling_cusum::RollingCusum;

mod cusum;
pub use cusum::{Cusum, CusumBuilder, RECOMMENDED_BASELINE, RECOMMENDED_GUARD_BAND, cusum};
