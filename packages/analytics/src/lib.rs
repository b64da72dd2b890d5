#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering, ranking, coloring, and sampling over the complaint map tables.
//!
//! Every function here is pure over borrowed cluster rows and is recomputed
//! on each request. None of them fail: an empty selection produces empty
//! output, and a color lookup miss produces [`colors::FALLBACK_COLOR`].

pub mod center;
pub mod colors;
pub mod filters;
pub mod rankings;
pub mod sampling;
