//! Well-Known Text reading and writing.
//!
//! ```
//! use simple_features::wkt::{WktReader, WktWriter};
//!
//! let geometry = WktReader::new().read("polygon ((0 0, 0 90, 90 90, 90 0, 0 0))").unwrap();
//! assert_eq!(
//!     WktWriter::new().write(&geometry),
//!     "POLYGON ((0 0, 0 90, 90 90, 90 0, 0 0))"
//! );
//! ```

mod reader;
mod tokenizer;
mod writer;

pub use reader::{WktReader, MAX_NESTING_DEPTH};
pub use tokenizer::{Keyword, Token, Tokenizer};
pub use writer::WktWriter;

use crate::CoordinateKind;

/// The dimensionality suffix for `kind`, `XY` when there is none.
pub(crate) fn dimension_keyword(kind: CoordinateKind) -> &'static str {
    match kind {
        CoordinateKind::Xy => "XY",
        CoordinateKind::Xyz => "Z",
        CoordinateKind::Xym => "M",
        CoordinateKind::Xyzm => "ZM",
    }
}
