// Startup curation prompt template.
// Placeholders are `{key}` tokens filled in a single pass by `prompt_builder`;
// braces that do not name a known key (the JSON schema) are left untouched.

pub const CURATION_PROMPT_TEMPLATE: &str = r#"You are a startup-curation research agent.

Task:
Curate a list of high-potential startups to apply to, focusing on:
- Core products and what problems they solve
- Founders' mentality and culture signals
- Alignment with the candidate's interests and skills
- Bonus points for open-source involvement (products, tooling, or contributions)

Input:
- Candidate Profile:
  - Name: {name}
  - Headline/Role: {headline}
  - Skills/Tech: {skills}
  - Interests/Theses: {interests}
  - Values/Culture: {values}
  - Notable Links (GitHub/Portfolio/LinkedIn): {links}

- Preferences/Filters:
  - Sectors/Problem Areas: {sectors}
  - Stage Preference: {stage}
  - Team Size Range: {team_size}
  - Location/Remote: {location}
  - Open-Source Importance: {oss_importance}
  - Other Constraints: {other}
  - Exclude Companies: {exclude}
  - Geographic Focus: {geo}

- Provided companies to vet (optional):
  {provided_companies}

Output requirements:
- Return ONLY valid, minified JSON (no comments, no markdown fences).
- If you are unsure of a fact, use "unknown" or empty strings.
- Do NOT invent links. Only include links you are reasonably confident about.
- Prefer startups that meaningfully align with the candidate profile.
- Include both: (1) fresh/newer companies if relevant, and (2) enduring, mission-aligned companies.
- If the user provided companies, prioritize vetting and ranking them, and fill remaining slots with additional suggestions.

JSON schema:
{
  "generated_at": "<ISO-8601 timestamp>",
  "query_summary": "<short summary of how you interpreted the candidate's profile and constraints>",
  "startups": [
    {
      "name": "<company name>",
      "website": "<official website or empty>",
      "hq_location": "<city/country or remote or unknown>",
      "stage": "<pre-seed|seed|series-a|series-b|growth|unknown>",
      "team_size": "<approx or unknown>",
      "core_product": "<clear summary of product and problem solved>",
      "founders": [
        {
          "name": "<founder name or unknown>",
          "background": "<short background or unknown>",
          "mentality_notes": "<signals on builder mindset, product-first, frugality, research orientation, etc.>"
        }
      ],
      "open_source_involvement": {
        "level": "<none|partial|core|unknown>",
        "repos": [
          {"name": "<repo name>", "url": "<repo url>"}
        ]
      },
      "why_aligned": "<explicit alignment with candidate's interests, skills, and values>",
      "suggested_roles": ["<role 1>", "<role 2>"],
      "example_outreach": "<a short, tailored outreach note the candidate could send>",
      "sources": [
        {"label": "website", "url": "<url or empty>"},
        {"label": "github", "url": "<url or empty>"},
        {"label": "other", "url": "<url or empty>"}
      ],
      "confidence": <float between 0 and 1>
    }
  ],
  "notes": "<disclaimers and what to validate next>",
  "next_actions": ["<suggested next steps for the candidate>"]
}

Constraints:
- Limit the list to exactly {top_n} startups.
- Ensure diversity of choices while adhering to preferences.
- Keep fields concise but specific."#;
