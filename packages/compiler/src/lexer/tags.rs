//! HTML tag definitions
//!
//! Per-tag behavior flags consulted by the HTML syntax: void tags take no
//! closing tag, raw-text tags capture their content verbatim with no
//! directive or interpolation parsing inside.

use std::collections::HashMap;

use bitflags::bitflags;
use once_cell::sync::Lazy;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TagFlags: u8 {
        const VOID = 1 << 0;
        const RAW_TEXT = 1 << 1;
    }
}

static TAG_DEFINITIONS: Lazy<HashMap<&'static str, TagFlags>> = Lazy::new(|| {
    let mut defs = HashMap::new();
    for void in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ] {
        defs.insert(void, TagFlags::VOID);
    }
    for raw in ["script", "style"] {
        defs.insert(raw, TagFlags::RAW_TEXT);
    }
    defs
});

/// Flags for a tag name; unknown tags get the empty set.
pub fn definition(name: &str) -> TagFlags {
    let lower = name.to_ascii_lowercase();
    TAG_DEFINITIONS
        .get(lower.as_str())
        .copied()
        .unwrap_or(TagFlags::empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_void_and_raw_text_tags() {
        assert!(definition("br").contains(TagFlags::VOID));
        assert!(definition("BR").contains(TagFlags::VOID));
        assert!(definition("script").contains(TagFlags::RAW_TEXT));
        assert_eq!(definition("div"), TagFlags::empty());
    }
}
