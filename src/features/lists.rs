//! Numbered list continuity
//!
//! Converters restart an ordered list at `1.` whenever an image interrupts
//! it. This filter renumbers such items so the list continues, unless a
//! section break sits between the two halves.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LIST_ITEM: Regex = Regex::new(r"^(\d+)\.\s+(.*)$").unwrap();
}

/// How far back to look for the image that split the list
const IMAGE_LOOKBACK: usize = 5;
/// How far back to look for a heading or settings window that resets numbering
const SECTION_LOOKBACK: usize = 10;

/// Headings that continue the surrounding numbered procedure
const CONTINUING_SECTIONS: [&str; 3] = ["system settings", "cms reporting", "sim card"];

fn is_image_line(line: &str) -> bool {
    let trimmed = line.trim();
    line.contains("<img ") || trimmed.starts_with("![") || trimmed.starts_with("<img")
}

fn looks_like_section_break(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.starts_with("###")
        || line.starts_with("***")
        || lower.contains("window:")
        || (lower.contains("settings") && (line.contains("**") || line.contains("window")))
}

/// Is there a section break in the lines before `index`?
fn section_break_before(lines: &[&str], index: usize) -> bool {
    for line in lines[index.saturating_sub(SECTION_LOOKBACK)..index].iter() {
        if looks_like_section_break(line) {
            let lower = line.to_lowercase();
            return !CONTINUING_SECTIONS.iter().any(|k| lower.contains(k));
        }
    }
    false
}

fn image_before(lines: &[&str], index: usize) -> bool {
    lines[index.saturating_sub(IMAGE_LOOKBACK)..index]
        .iter()
        .any(|line| is_image_line(line))
}

/// Renumber ordered lists that restart at 1 right after an image
pub fn fix_list_continuity(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    // `None` once the list holds a number too large to continue from
    let mut current: Option<u64> = Some(0);
    let mut in_list = false;

    for (i, &line) in lines.iter().enumerate() {
        if let Some(caps) = LIST_ITEM.captures(line) {
            let number = caps[1].parse::<u64>().ok();
            let text = &caps[2];

            let continues = number == Some(1)
                && in_list
                && image_before(&lines, i)
                && !section_break_before(&lines, i);
            match current.and_then(|n| n.checked_add(1)) {
                Some(next) if continues => {
                    current = Some(next);
                    result.push(format!("{}. {}", next, text));
                }
                _ => {
                    current = number;
                    result.push(line.to_string());
                }
            }
            in_list = true;
            continue;
        }

        if line.starts_with("##") || line.starts_with("***") {
            in_list = false;
            current = Some(0);
        }
        result.push(line.to_string());
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_continues_after_image() {
        let input = "1. Open the panel\n2. Press ENTER\n\n![](./image3.png)\n\n1. Select the zone";
        let expected = "1. Open the panel\n2. Press ENTER\n\n![](./image3.png)\n\n3. Select the zone";
        assert_eq!(fix_list_continuity(input), expected);
    }

    #[test]
    fn test_html_image_counts() {
        let input = "1. One\n<p><img src=\"a.png\" /></p>\n1. Two";
        assert_eq!(fix_list_continuity(input), "1. One\n<p><img src=\"a.png\" /></p>\n2. Two");
    }

    #[test]
    fn test_heading_resets_list() {
        let input = "1. One\n2. Two\n## Next\n![](image.png)\n1. Fresh";
        assert_eq!(fix_list_continuity(input), input);
    }

    #[test]
    fn test_section_break_between_blocks_resets() {
        let input = "1. One\n2. Two\n**Network settings**\n![](image.png)\n1. Fresh";
        assert_eq!(fix_list_continuity(input), input);
    }

    #[test]
    fn test_continuing_sections_keep_numbering() {
        let input = "1. One\n2. Two\n**System Settings window**\n![](image.png)\n1. Next";
        assert_eq!(
            fix_list_continuity(input),
            "1. One\n2. Two\n**System Settings window**\n![](image.png)\n3. Next"
        );
    }

    #[test]
    fn test_huge_numbers_are_not_renumbered() {
        let max = "18446744073709551615. a\n![](image1.png)\n1. b";
        assert_eq!(fix_list_continuity(max), max);
        let too_big = "99999999999999999999999. a\n![](image1.png)\n1. b";
        assert_eq!(fix_list_continuity(too_big), too_big);
    }

    #[test]
    fn test_capitalized_window_is_not_a_break() {
        let input = "1. One\nOpen the Settings Window\n![](image.png)\n1. Next";
        assert_eq!(
            fix_list_continuity(input),
            "1. One\nOpen the Settings Window\n![](image.png)\n2. Next"
        );
        let lower = "1. One\nOpen the settings window\n![](image.png)\n1. Next";
        assert_eq!(fix_list_continuity(lower), lower);
    }

    #[test]
    fn test_no_image_no_change() {
        let input = "1. One\n\nParagraph\n\n1. One again";
        assert_eq!(fix_list_continuity(input), input);
    }
}
