// Company search prompt templates.

pub const VERIFY_SYSTEM: &str =
    "You are an expert on companies, with particular knowledge of Korean businesses. \
     You decide whether a company actually exists.";

/// Replace: {company}
pub const VERIFY_PROMPT_TEMPLATE: &str = r#"Check whether a company called "{company}" actually exists.

**Important:**
- If it is a real company, return "exists"
- If it does not exist or you do not know it, return "not_found"
- Answer with exactly one of "exists" or "not_found"

Respond only in this JSON format:
{
  "status": "exists" or "not_found",
  "confidence": "high" or "medium" or "low",
  "realName": "the company's actual name, spelled correctly"
}

Examples:
- "Gangnam Unni" -> {"status": "exists", "confidence": "high", "realName": "Gangnam Unni"}
- "kakao" -> {"status": "exists", "confidence": "high", "realName": "Kakao"}
- "NonExistentCompany123" -> {"status": "not_found", "confidence": "high", "realName": ""}"#;

pub const PROFILE_SYSTEM: &str =
    "You are a recruiting and interview expert. Based on what is known about a real company, \
     you provide the information a candidate needs to prepare for its interviews.";

/// Replace: {company}, {position_line}, {job_posting_block}, {language}
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"Create interview preparation material for "{company}", a company that really exists.
{position_line}
{job_posting_block}
Provide the following as JSON:

{
  "industry": "industry (e.g. IT/Healthcare, Manufacturing, Finance, Startup)",
  "interviewFocus": ["3-4 things the interview focuses on"],
  "portfolioTips": ["3-4 portfolio tips"],
  "commonQuestions": ["3-5 likely interview questions"]
}

**Guidelines:**
1. Reflect the actual character and culture of "{company}"
2. interviewFocus items must be concrete and practical (e.g. "Problem solving", "Collaboration", "Technical depth")
3. portfolioTips must be actionable advice
4. commonQuestions must be questions a real interview would plausibly ask
5. Write every value in {language}"#;

/// Replace: {position}
pub const POSITION_LINE_TEMPLATE: &str = "The position is \"{position}\".";

/// Replace: {job_posting}
pub const JOB_POSTING_BLOCK_TEMPLATE: &str = r#"
**Job posting:**
"""
{job_posting}
"""

Analyze the posting above and derive the competencies the company values, what the interview will focus on, portfolio tips and likely questions.
"#;
