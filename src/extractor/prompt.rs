//! Prompt construction for module extraction

use crate::crawler::truncate_chars;
use crate::extractor::PageContent;

/// System message sent with every extraction request
pub const SYSTEM_PROMPT: &str = "You are a Product Management AI assistant that extracts structured module information from product documentation. Always return valid JSON.";

/// Character cap on the documentation portion of the prompt
const PROMPT_CONTENT_CAP: usize = 60_000;

/// Marker appended when the documentation portion was cut
const PROMPT_TRUNCATION_MARKER: &str = "\n\n[Content truncated to fit token limits...]";

/// Builds the user prompt for one extraction request
///
/// The documentation blocks are concatenated first and capped at
/// [`PROMPT_CONTENT_CAP`] characters before the surrounding instructions are
/// added, keeping the beginning of the content since it is usually the most
/// representative.
pub fn build_extraction_prompt(pages: &[PageContent]) -> String {
    let content_text = pages
        .iter()
        .map(|page| format!("Documentation from {}:\n{}", page.url, page.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let content_text = truncate_prompt_content(content_text);

    let n = pages.len();
    let plural = if n > 1 { "s" } else { "" };
    let url_list = pages
        .iter()
        .map(|page| page.url.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a Product Management AI assistant. Analyze the following product documentation from {n} source{plural} and extract the product modules and submodules.

IMPORTANT: You are analyzing documentation from {n} different URL{plural}:
{url_list}

Your task is to:
1. Analyze ALL the documentation provided from ALL {n} source{plural}
2. Identify distinct product modules (high-level feature areas) across ALL sources
3. For each module, identify submodules (specific features or capabilities) from ALL sources
4. Combine and merge related modules/submodules from different sources
5. Provide clear, concise descriptions suitable for Product Managers
6. Base your analysis strictly on the provided documentation - do not hallucinate features

Documentation Content from {n} source{plural}:
{content_text}

Return a JSON object with a "modules" key containing an array with the following structure:
{{
  "modules": [
    {{
      "module": "Module Name",
      "description": "High-level description of the module from a product perspective",
      "submodules": {{
        "Submodule Name": "Concise description of the submodule functionality"
      }}
    }}
  ]
}}

Guidelines:
- Analyze and extract modules from ALL {n} documentation source{plural} provided
- If the same module appears in multiple sources, merge them into one entry
- Modules should represent major functional areas of the product
- Submodules should be specific features or capabilities within each module
- Descriptions should be clear, professional, and PM-friendly
- Only include modules/submodules that are clearly mentioned or implied in the documentation
- Group related features logically across all sources
- Use consistent naming conventions
- If no clear modules can be identified, return {{"modules": []}}

Return ONLY valid JSON, no additional text or explanation."#
    )
}

fn truncate_prompt_content(text: String) -> String {
    if text.chars().count() <= PROMPT_CONTENT_CAP {
        return text;
    }

    let mut capped = truncate_chars(&text, PROMPT_CONTENT_CAP).to_owned();
    capped.push_str(PROMPT_TRUNCATION_MARKER);
    capped
}
