//! Block comment extraction.
//!
//! Only text between `/*` and the next `*/` is ever looked at by the later
//! stages. Comments do not nest, and an unterminated `/*` yields nothing.

use tracing::trace;

const OPEN: &str = "/*";
const CLOSE: &str = "*/";

/// Return the body of every `/* ... */` comment in source order.
pub fn extract_bodies(input: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut pos = 0;

    while let Some(open) = input[pos..].find(OPEN) {
        let start = pos + open + OPEN.len();
        match input[start..].find(CLOSE) {
            Some(close) => {
                let end = start + close;
                bodies.push(&input[start..end]);
                pos = end + CLOSE.len();
            }
            None => {
                trace!(offset = start - OPEN.len(), "unterminated block comment");
                break;
            }
        }
    }

    bodies
}
