// Prompt templates for the remote analysis provider.
// Placeholders in `{braces}` are replaced with `str::replace` before sending.

pub const RESUME_PROMPT_TEMPLATE: &str = r#"Analyze this professional profile.
1. Extract technical skills AND soft skills.
2. Identify specific projects mentioned.
3. Assign proficiency levels based on depth of experience.

Return a JSON object with this EXACT schema:
{
  "skills": [
    {"name": "React", "level": "Intermediate", "category": "Frontend", "confidence": 0.8, "isSoftSkill": false}
  ],
  "projects": [
    {"name": "Budget Tracker", "description": "Personal finance dashboard", "techStack": ["React", "Node.js"]}
  ],
  "detectedExperienceLevel": "Junior"
}

"level" MUST be one of "Basic", "Intermediate", "Advanced".
"confidence" MUST be a number between 0 and 1.

Text: """{text}""""#;

pub const LINKEDIN_PROMPT_TEMPLATE: &str = r#"Perform a deep signal analysis of this LinkedIn bio/summary.
Even if the text is short, identify the core professional domain and extract associated skills.

Return a JSON object with this EXACT schema:
{
  "skills": [
    {"name": "Communication", "level": "Advanced", "category": "Soft Skills", "isSoftSkill": true}
  ],
  "experience": [
    {"role": "Frontend Intern", "company": "Acme", "duration": "6 months"}
  ]
}

"level" MUST be one of "Basic", "Intermediate", "Advanced".

Input Profile Text: """{text}""""#;

pub const GITHUB_PROMPT_TEMPLATE: &str = r#"Analyze these GitHub repositories. Identify technical skills and highlight significant projects.

Return a JSON object with this EXACT schema:
{
  "skills": [
    {"name": "TypeScript", "level": "Intermediate", "category": "Language"}
  ],
  "topProjects": [
    {"name": "repo-name", "description": "What it does", "techStack": ["TypeScript"]}
  ]
}

"level" MUST be one of "Basic", "Intermediate", "Advanced".

Repositories: {repos}"#;

pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Generate a STANDARDIZED DAILY actionable roadmap for a {role}.
Personalize based on current skills: {skills}

STRICT STRUCTURE:
Phase 1: Foundation (Days 1-7)
Phase 2: Skill Building (Days 8-21)
Phase 3: Projects (Days 22-35)
Phase 4: Interview Readiness (Days 36-45)

Return a JSON array with one object per day. EVERY day MUST include:
{
  "day": 1,
  "phase": "Foundation",
  "primaryGoal": "What this day achieves",
  "learningTask": "Concepts to read or watch",
  "practiceTask": "Small exercises or drills",
  "buildingTask": "Part of a larger project or a micro-build",
  "reviewTask": "How to verify success for the day",
  "expectedOutput": "Tangible artifact at end of day",
  "timeEstimate": "180 mins",
  "milestone": null
}

"phase" MUST be one of "Foundation", "Skill Building", "Projects", "Interview Readiness".
"milestone" is a short progress status every 7th day, otherwise null."#;

pub const REGENERATE_STEP_PROMPT_TEMPLATE: &str = r#"Regenerate this specific roadmap step for a {role} to make it more challenging and industry-aligned.
Keep the same "day" and "phase". Return ONE JSON object with the same fields as the original.

Original Step: {step}"#;

pub const MARKET_PULSE_PROMPT_TEMPLATE: &str = r#"Provide current hiring trends, internship counts, and market data for {role} in {location}.

Respond with ONLY a JSON object of this shape:
{
  "hotSkills": ["..."],
  "emergingTrends": ["..."],
  "salaryRange": "...",
  "marketOutlook": "...",
  "internshipRecommendations": ["..."]
}"#;

pub const MENTOR_PROMPT_TEMPLATE: &str = r#"OBJECTIVE:
Provide structured, professional advice for {profile}.

CONSTRAINTS:
- Use **bold headers** for sections.
- Use bullet points for steps.
- Be clear, professional, and actionable.

Recent History: {history}"#;

pub const COVER_LETTER_PROMPT_TEMPLATE: &str =
    "Write a high-impact cover letter for a {job_title} at {company}. Resume context: {resume}";

pub const STRATEGY_PROMPT_TEMPLATE: &str =
    "Provide a 3-step winning strategy for {job_title} at {company}. User Skills: {skills}";
