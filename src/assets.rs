//! Static assets embedded in the binary.

/// Upload form. PDFs are rasterized (first page only) in the browser before submission.
pub const INDEX_HTML: &str = include_str!("assets/index.html");
