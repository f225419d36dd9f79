//! One module per block kind. Each exposes a `matches` predicate over the
//! line at the cursor and a `consume` function that takes the lines the
//! block owns and returns the block plus the index of the first line after it.

pub mod aside;
pub mod code_fence;
pub mod heading;
pub mod image;
pub mod list;
pub mod note;
pub mod paragraph;
pub mod table;
