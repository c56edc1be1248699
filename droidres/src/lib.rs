//! Generates the density bucketed png resources an android app needs from a
//! single source image.
mod compose;
mod density;
mod error;
mod generator;
mod profile;
mod resolution;

pub use crate::compose::{bounding_box, center_offset, compose_boxed, fit_to_box, Filter, Rect};
pub use crate::density::{res_dir, res_dir_name, Density, DirType};
pub use crate::error::{Error, Result};
pub use crate::generator::{GeneratedAsset, Generator, Source};
pub use crate::profile::{normalize_filename, IconProfile, Mode, ModeSpec, REFERENCE_DPI};
pub use crate::resolution::{scale, scale_size};
