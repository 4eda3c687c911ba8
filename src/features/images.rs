//! Relative image path normalization
//!
//! Extracted media is referenced as `image12.png` or `images/…`. Prefixing
//! `./` keeps those references resolving the same way from every renderer.
//! Targets that are already `./…`, absolute URLs or fragments never start with
//! `image`, so they are left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `![alt](image…)` and `[text](image…)`
    static ref MARKDOWN_TARGET: Regex = Regex::new(r"(!?\[[^\]]*\]\()(image[^)]+)\)").unwrap();
    /// `src="image…"`
    static ref HTML_SRC: Regex = Regex::new(r#"src="(image[^"]*)""#).unwrap();
}

/// Prefix relative `image…` references with `./`
pub fn fix_relative_images(content: &str) -> String {
    let text = MARKDOWN_TARGET.replace_all(content, |caps: &Captures| {
        format!("{}./{})", &caps[1], &caps[2])
    });
    HTML_SRC
        .replace_all(&text, |caps: &Captures| format!("src=\"./{}\"", &caps[1]))
        .into_owned()
}
