//! File parsers feeding the scanner.
//!
//! - `resx`: resource containers (string entries and their origin)
//! - `usings`: namespace scope of a source file
//! - `aspx`: code blocks embedded in web form markup

pub mod aspx;
pub mod resx;
pub mod usings;
