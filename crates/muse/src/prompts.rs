//! Prompt builders for idea generation and business-canvas elaboration.

use crate::details::Aspect;

pub fn idea_prompt(interest: &str, region: &str) -> String {
  format!(
    "You are an expert at brainstorming innovative startup ideas. Work through these steps \
before answering:\n\
\n\
1. Identify a specific, underserved pain point for {region} within {interest}.\n\
2. Consider current {interest} trends such as AI-driven personalization, local-language \
content, hybrid delivery, gamification and verifiable credentials.\n\
3. Propose a novel solution that is clearly distinct from the established players in \
{interest}, avoiding generic offerings they already cover.\n\
4. Make sure the idea is feasible, scalable and tailored to {region}.\n\
5. Write a concise description (100-150 words) that does not repeat previously generated \
ideas. Favour niche angles over broad platforms.\n\
\n\
Generate one startup idea for the {interest} domain targeting {region}.\n"
  )
}

pub fn canvas_prompt(idea: &str, aspect: Aspect) -> String {
  let section = aspect.as_str();
  format!(
    "Given the startup idea: '{idea}', provide a concise {section} analysis for a business \
model canvas, focusing on the {section} considerations most relevant to this venture.\n"
  )
}
