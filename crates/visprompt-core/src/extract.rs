//! Prompt extraction for the copy action.
//!
//! Best-effort: looks for the first fenced block tagged `prompt`, `text` or
//! `markdown`. When none is found the caller copies the whole result.

/// Fence tags that mark the prompt block.
pub const PROMPT_FENCE_TAGS: [&str; 3] = ["prompt", "text", "markdown"];

/// Inner content of the first fenced block tagged as a prompt.
pub fn find_prompt_block(text: &str) -> Option<&str> {
    let mut offset = 0;
    // (tag matched, byte offset where the block content starts)
    let mut open: Option<(bool, usize)> = None;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let Some(info) = line.trim().strip_prefix("```") else {
            continue;
        };

        match open {
            None => open = Some((is_prompt_tag(info), offset)),
            Some((matched, content_start)) if info.trim().is_empty() => {
                if matched {
                    return Some(text[content_start..line_start].trim());
                }
                open = None;
            }
            Some(_) => {}
        }
    }

    None
}

/// Text to place on the clipboard for a result.
pub fn extract_prompt(text: &str) -> &str {
    find_prompt_block(text).unwrap_or(text)
}

fn is_prompt_tag(info: &str) -> bool {
    info.split_whitespace()
        .next()
        .map(|tag| PROMPT_FENCE_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_block() {
        let text = "### Prompt\n```prompt\ncat on a chair\n```";
        assert_eq!(extract_prompt(text), "cat on a chair");
    }

    #[test]
    fn test_text_and_markdown_tags() {
        assert_eq!(extract_prompt("```text\nfoggy pier\n```\n"), "foggy pier");
        assert_eq!(extract_prompt("intro\n```Markdown\n**bold** prompt\n```\nrest"), "**bold** prompt");
    }

    #[test]
    fn test_multiline_prompt_keeps_inner_lines() {
        let text = "```prompt\nline one\nline two\n```";
        assert_eq!(extract_prompt(text), "line one\nline two");
    }

    #[test]
    fn test_skips_other_fences() {
        let text = "```json\n{\"a\": 1}\n```\n\n```prompt\nsunset over dunes\n```\n";
        assert_eq!(extract_prompt(text), "sunset over dunes");
    }

    #[test]
    fn test_first_matching_block_wins() {
        let text = "```prompt\nfirst\n```\n```text\nsecond\n```";
        assert_eq!(extract_prompt(text), "first");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "### Prompt\r\n```prompt\r\nneon alley\r\n```\r\n";
        assert_eq!(extract_prompt(text), "neon alley");
    }

    #[test]
    fn test_fallback_to_full_text() {
        let text = "No fenced block here, just prose.";
        assert_eq!(extract_prompt(text), text);

        let untagged = "```\nplain block\n```";
        assert_eq!(extract_prompt(untagged), untagged);

        let unclosed = "```prompt\nnever closed";
        assert_eq!(extract_prompt(unclosed), unclosed);
    }
}
