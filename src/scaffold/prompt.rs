//! Prompt templates for scaffold generation

/// Opening instruction shared by the initial and the repair prompt
pub const PLAN_PROMPT: &str = "\
You are an AI software architect. Given the project spec below, return a JSON object with:
- plan: short bullet list of steps
- files: array of {path, content} to create a minimal, runnable app
Project spec:
";

/// Hard requirements appended to the initial prompt
pub const PLAN_RULES: &str = "
Rules:
- Use FastAPI + Uvicorn, include requirements.txt
- Include a simple PostgreSQL integration using SQLAlchemy (env-driven URI)
- Include Dockerfile and render.yaml (Render Blueprint) for web service
- Include a README.md with run and deploy instructions
- Keep code minimal but runnable; no placeholders like \"TODO\"
- Return ONLY JSON (no markdown) with keys { \"plan\": string, \"files\": [ ... ] }
";

const REPAIR_PREFIX: &str = "Return strict JSON only. ";

/// Prompt for the first attempt
pub fn build_plan_prompt(spec: &str) -> String {
    format!("{}\n{}{}", PLAN_PROMPT, spec, PLAN_RULES)
}

/// Prompt for the single repair attempt after an unparseable reply
pub fn build_repair_prompt(spec: &str) -> String {
    format!("{}{}\n{}", REPAIR_PREFIX, PLAN_PROMPT, spec)
}
