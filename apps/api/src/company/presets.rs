//! Built-in company catalog.

use crate::models::company::Company;

pub struct CompanyPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub industry: &'static str,
    pub interview_focus: &'static [&'static str],
    pub portfolio_tips: &'static [&'static str],
    pub common_questions: &'static [&'static str],
}

impl CompanyPreset {
    pub fn to_company(&self) -> Company {
        Company {
            id: self.id.to_string(),
            name: self.name.to_string(),
            industry: self.industry.to_string(),
            interview_focus: owned(self.interview_focus),
            portfolio_tips: owned(self.portfolio_tips),
            common_questions: owned(self.common_questions),
            job_posting: None,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub const PRESETS: &[CompanyPreset] = &[
    CompanyPreset {
        id: "kakao",
        name: "Kakao",
        industry: "IT/Internet",
        interview_focus: &[
            "User-centered thinking",
            "Collaboration",
            "Technical depth",
            "Problem solving",
            "Service improvement experience",
        ],
        portfolio_tips: &[
            "Highlight design experience that accounts for a very large user base",
            "Include examples of data-driven decisions",
            "Describe the team collaboration process and your role clearly",
            "Present concrete success metrics (MAU, conversion rate, etc.)",
            "Explain why you chose your tech stack and the trade-offs involved",
        ],
        common_questions: &[
            "What was the hardest technical challenge in the project?",
            "How did you incorporate user feedback?",
            "How did you resolve disagreements with teammates?",
            "What are the key success metrics of this project?",
        ],
    },
    CompanyPreset {
        id: "naver",
        name: "Naver",
        industry: "IT/Internet",
        interview_focus: &[
            "Technical skill",
            "Scalable design",
            "Code quality",
            "Performance optimization",
            "Problem definition",
        ],
        portfolio_tips: &[
            "Describe technical depth and implementation details thoroughly",
            "Include before/after data for performance improvements",
            "Explain an architecture designed for scale",
            "Show efforts to improve code quality (tests, refactoring, etc.)",
            "Add tech blog posts or open-source contributions",
        ],
        common_questions: &[
            "Where was the bottleneck in this system and how did you fix it?",
            "Why did you choose this tech stack?",
            "How did you run code reviews?",
            "What would break if traffic grew tenfold?",
        ],
    },
    CompanyPreset {
        id: "toss",
        name: "Toss",
        industry: "Fintech",
        interview_focus: &[
            "User experience",
            "Obsession with detail",
            "Fast execution",
            "Data-driven thinking",
            "Creating customer value",
        ],
        portfolio_tips: &[
            "Explain the UI/UX improvement process and its reasons in detail",
            "Emphasize experience with experimentation such as A/B testing",
            "Show examples of fast iteration and improvement",
            "Show experience analyzing user behavior data",
            "Include simple, intuitive interface designs",
        ],
        common_questions: &[
            "Why should a user use this feature?",
            "How did you measure the effect of the UI improvement?",
            "What did you improve the most, and why?",
            "Were there unexpected usage patterns after launch?",
        ],
    },
    CompanyPreset {
        id: "coupang",
        name: "Coupang",
        industry: "E-commerce/Tech",
        interview_focus: &[
            "Large-scale systems experience",
            "Problem solving",
            "Ownership",
            "Data-driven decisions",
            "Customer-centric thinking",
        ],
        portfolio_tips: &[
            "High-traffic handling experience",
            "Examples of improving system stability",
            "Monitoring and incident response experience",
            "Business impact expressed in concrete numbers",
            "End-to-end project ownership",
        ],
        common_questions: &[
            "How did you respond during an outage?",
            "How did you build system monitoring?",
            "What was the business impact of the project?",
            "Have you improved a legacy system?",
        ],
    },
    CompanyPreset {
        id: "startup",
        name: "Startup (general)",
        industry: "Startup",
        interview_focus: &[
            "Fast learning",
            "Wearing many hats",
            "Self-driven problem solving",
            "Product mindset",
            "Communication",
        ],
        portfolio_tips: &[
            "Emphasize 0-to-1 project experience",
            "Problem solving with limited resources",
            "Ability to work across many tech stacks",
            "Fast MVP development and pivot experience",
            "Collaboration outside engineering (planning, design, etc.)",
        ],
        common_questions: &[
            "Have you completed a project on your own?",
            "Give an example of learning a new technology quickly.",
            "How did you set priorities under time pressure?",
            "What did you learn from a failed project?",
        ],
    },
    CompanyPreset {
        id: "samsung",
        name: "Samsung Electronics",
        industry: "Electronics/Manufacturing",
        interview_focus: &[
            "Technical expertise",
            "Research and development capability",
            "Collaboration and communication",
            "Global mindset",
            "Innovation",
        ],
        portfolio_tips: &[
            "Hardware/software integration experience",
            "Research results such as patents or papers",
            "Global project experience",
            "Applying the latest technology trends",
            "Systematic documentation skills",
        ],
        common_questions: &[
            "Which recent technology trend interests you most?",
            "What makes your research project original?",
            "Have you collaborated with a global team?",
            "How did you solve a hard technical problem?",
        ],
    },
];

pub fn all() -> Vec<Company> {
    PRESETS.iter().map(CompanyPreset::to_company).collect()
}

pub fn find_by_id(id: &str) -> Option<Company> {
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .map(CompanyPreset::to_company)
}

/// First preset whose name contains `name`, ignoring case.
pub fn find_by_name(name: &str) -> Option<Company> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    PRESETS
        .iter()
        .find(|p| p.name.to_lowercase().contains(&needle))
        .map(CompanyPreset::to_company)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique_and_profiles_complete() {
        let mut ids: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PRESETS.len());
        assert_eq!(PRESETS.len(), 6);

        for preset in PRESETS {
            assert!(!preset.interview_focus.is_empty(), "{}", preset.id);
            assert!(!preset.portfolio_tips.is_empty(), "{}", preset.id);
            assert!(!preset.common_questions.is_empty(), "{}", preset.id);
        }
    }

    #[test]
    fn test_find_by_id() {
        let toss = find_by_id("toss").unwrap();
        assert_eq!(toss.name, "Toss");
        assert_eq!(toss.industry, "Fintech");
        assert!(find_by_id("TOSS").is_none());
        assert!(find_by_id("unknown").is_none());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_substring() {
        assert_eq!(find_by_name("samsung").unwrap().id, "samsung");
        assert_eq!(find_by_name("KAKAO").unwrap().id, "kakao");
        assert_eq!(find_by_name("start").unwrap().id, "startup");
        assert!(find_by_name("Line").is_none());
        assert!(find_by_name("  ").is_none());
    }
}
