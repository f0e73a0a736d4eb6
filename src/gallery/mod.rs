/// Gallery page module
///
/// - `tree.rs` - the addressable page elements
/// - `render.rs` - cards and category buttons from the record sequence
/// - `filter.rs` - category and search visibility filters
/// - `detail.rs` - lightbox open/close and download

pub mod detail;
pub mod filter;
pub mod render;
pub mod tree;

pub use tree::ViewTree;
