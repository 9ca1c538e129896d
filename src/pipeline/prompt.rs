// src/pipeline/prompt.rs
// =============================================================================
// The two prompts sent to the model:
// 1. readme_prompt: the joined source code, asking for a full README
// 2. summary_prompt: that README, asking for a one-line description
// =============================================================================

/// Prompt for the full README, with the joined source code inlined
pub fn readme_prompt(source: &str) -> String {
    format!(
        "Create a comprehensive README file for the following source code from a GitHub repository.\n\
         Include installation instructions, usage examples, contributing guidelines, and license information if possible.\n\
         \n\
         Code:\n\
         {source}\n\
         \n\
         Do not include any author or publish year. Simply mention the license.\n\
         \n\
         If any API keys, tokens, passwords or other credentials appear in the code, DO NOT include or expose them in the README.\n\
         Just give plain text, no extra symbols, boxes, or surrounding formatting.\n"
    )
}

/// Prompt asking for a one-line plain-text summary of a README
pub fn summary_prompt(readme: &str) -> String {
    format!(
        "{readme}\n\
         \n\
         Strictly the output needs to be a single-line plain text explanation about the project above.\n\
         No formatting like markdown or LaTeX. Just return the 1-line plain text summary.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_prompt_embeds_source_and_directives() {
        let prompt = readme_prompt("def main():\n    pass");

        assert!(prompt.contains("def main():\n    pass"));
        assert!(prompt.contains("author or publish year"));
        assert!(prompt.contains("DO NOT include or expose them"));
    }

    #[test]
    fn test_summary_prompt_starts_with_readme() {
        let prompt = summary_prompt("# Demo\nA demo project.");

        assert!(prompt.starts_with("# Demo\nA demo project.\n"));
        assert!(prompt.contains("single-line plain text"));
    }
}
