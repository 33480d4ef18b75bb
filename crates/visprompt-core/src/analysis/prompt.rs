//! Instruction sent alongside the image.

/// Heading of the section holding the reusable prompt.
pub const PROMPT_SECTION_HEADING: &str = "Cloning Prompt";

/// Heading of the section holding the human-readable breakdown.
pub const BREAKDOWN_SECTION_HEADING: &str = "Visual Breakdown";

/// Build the fixed analysis instruction.
///
/// The response is asked to carry the prompt inside a fenced block tagged
/// `prompt` so that [`crate::extract::extract_prompt`] can lift it out.
pub fn build_instruction(prompt_language: &str, breakdown_language: &str) -> String {
    format!(
        r#"You are an expert prompt engineer for text-to-image models. Analyze the attached image and reply in Markdown with exactly two sections.

### {prompt_heading}
Write, in {prompt_language}, a single detailed prompt that would let an image generation model reproduce this image as closely as possible. Put the prompt alone inside a fenced code block tagged `prompt`, like this:

```prompt
<the prompt>
```

### {breakdown_heading}
Write, in {breakdown_language}, a structured breakdown of the image with one bullet per aspect:
- Subject
- Style
- Lighting
- Composition
- Color

Do not add any other sections."#,
        prompt_heading = PROMPT_SECTION_HEADING,
        breakdown_heading = BREAKDOWN_SECTION_HEADING,
        prompt_language = prompt_language,
        breakdown_language = breakdown_language,
    )
}
