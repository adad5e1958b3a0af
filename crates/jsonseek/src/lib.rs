//! Zero-allocation, path-addressable scanning of JSON byte buffers.
//!
//! Instead of parsing a document into a tree, this crate walks the raw
//! bytes and answers pointed questions about them: [`get`] resolves a path
//! of keys and `[N]` index selectors to a borrowed region plus a
//! [`ValueKind`] tag, [`array_each`] and [`object_each`] visit a container
//! element by element, and [`each_key`] resolves many paths in one forward
//! pass. Nothing is copied; every extracted value borrows the input for
//! exactly as long as the input lives.
//!
//! The scanner is deliberately not a validator. It skips strings, arrays
//! and balanced objects opaquely wherever their contents cannot affect the
//! answer, and it stops reading the moment its question is answered, so
//! malformed bytes after an addressed value go unnoticed. Keys are only
//! escape-decoded when their raw form actually contains a backslash, into
//! a stack buffer for keys up to 64 decoded bytes.
//!
//! ```
//! use jsonseek::{get, ValueKind};
//!
//! let doc = br#"{"person":{"name":{"first":"Leonid"},"github":"followers"}}"#;
//! let v = get(doc, &["person", "name", "first"]).unwrap();
//! assert_eq!(v.kind, ValueKind::String);
//! assert_eq!(v.raw, b"Leonid");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod convert;
mod each;
mod each_key;
mod error;
mod get;
mod linecol;
mod path;
mod scan;
mod search;
mod unescape;
mod value;

pub use convert::{
    get_bool, get_float, get_int, get_str, get_string, parse_bool, parse_float, parse_int,
};
pub use each::{array_each, object_each};
pub use each_key::{each_key, MAX_PATHS};
pub use error::Error;
pub use get::get;
pub use linecol::LineIndex;
pub use unescape::unescape;
pub use value::{RawValue, ValueKind};
