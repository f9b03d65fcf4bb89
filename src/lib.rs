//! patterndoc: extract `@pattern` documentation from block comments.
//!
//! Feed [`parse`] the contents of a stylesheet or script and get back every
//! pattern documented in its `/* ... */` comments:
//!
//! ```text
//! /*
//!  * @pattern Button
//!  * @title A clickable button
//!  * @param {String} [label=OK] - Button text
//!  * @example Basic usage
//!  * ```html
//!  * <x-button label="Save"></x-button>
//!  * ```
//!  */
//! ```
//!
//! Comments without a `@pattern` tag are skipped, and malformed tag values
//! degrade to literal text instead of failing the parse.

pub mod model;
pub mod parser;
pub mod render;
mod toc;

pub use model::{CodeBlock, Example, Meta, Parameter, Pattern};

/// Parse all patterns documented in `input`, in source order.
pub fn parse(input: &str) -> Vec<Pattern> {
    parser::parse(input)
}
