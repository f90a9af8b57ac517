//! Post-interview self-assessment: a fixed 100-point checklist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationItem {
    pub id: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub examples: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationCategory {
    pub name: &'static str,
    pub max_score: u32,
    pub items: &'static [EvaluationItem],
}

pub const CRITERIA: &[EvaluationCategory] = &[
    EvaluationCategory {
        name: "1. Preparation",
        max_score: 20,
        items: &[
            EvaluationItem {
                id: "company_research",
                description: "Researched the company thoroughly (history, business, financials, news, job posting)",
                points: 10,
                examples: &[
                    "Mentioned recent company news or business direction",
                    "Prepared answers around keywords from the job posting",
                ],
            },
            EvaluationItem {
                id: "resume_mastery",
                description: "Can explain every resume item within one minute",
                points: 10,
                examples: &[
                    "Explained the core of each role clearly",
                    "Emphasized experience that overlaps with the posting's keywords",
                ],
            },
        ],
    },
    EvaluationCategory {
        name: "2. Interview Q&A",
        max_score: 60,
        items: &[
            EvaluationItem {
                id: "self_intro",
                description: "Self-introduction: keyword-driven, experience to results to strengths, under one minute",
                points: 10,
                examples: &[
                    "Concise and fact-based",
                    "Core message only, without flowery language",
                ],
            },
            EvaluationItem {
                id: "core_questions",
                description: "Core posting questions: clearly explained personal role, experience and skills",
                points: 20,
                examples: &[
                    "Described personal contribution rather than team results",
                    "Proposed solutions that fit the company's needs",
                ],
            },
            EvaluationItem {
                id: "common_questions",
                description: "Common questions (motivation, strengths and weaknesses, success and failure stories)",
                points: 20,
                examples: &[
                    "Motivation: future-focused, avoiding negative remarks",
                    "Strengths: attitude to action to result",
                    "Weaknesses: presented with evidence of improvement",
                    "Success/failure: concrete cases and lessons learned",
                ],
            },
            EvaluationItem {
                id: "final_question",
                description: "Closing question: insightful questions about vision and growth path",
                points: 10,
                examples: &[
                    "Asked about the company's future direction",
                    "Expressed long-term growth intent",
                    "Avoided work-life balance and vacation questions",
                ],
            },
        ],
    },
    EvaluationCategory {
        name: "3. Attitude",
        max_score: 20,
        items: &[
            EvaluationItem {
                id: "answer_style",
                description: "Answer style: conclusion first, concise, concrete numbers, positive ending",
                points: 15,
                examples: &[
                    "Spoke slower than usual and stayed composed",
                    "Used numbers instead of vague words",
                    "Did not end on a negative",
                    "Took a second or two to think before answering",
                ],
            },
            EvaluationItem {
                id: "behavior",
                description: "Demeanor: posture, eye contact, bright expression, long-term commitment",
                points: 5,
                examples: &[
                    "Sat forward and kept eye contact",
                    "Bright expression and light nodding",
                    "Avoided a noncommittal attitude",
                ],
            },
        ],
    },
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub checked_items: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u32,
    pub max_score: u32,
    pub feedback: &'static str,
}

pub fn max_score() -> u32 {
    CRITERIA.iter().map(|c| c.max_score).sum()
}

fn find_item(id: &str) -> Option<&'static EvaluationItem> {
    CRITERIA
        .iter()
        .flat_map(|c| c.items.iter())
        .find(|item| item.id == id)
}

/// Sums the points of the checked items. Duplicates count once.
pub fn score(checked_items: &[String]) -> Result<ScoreResult, AppError> {
    let mut seen = HashSet::new();
    let mut total = 0;

    for id in checked_items {
        let item = find_item(id)
            .ok_or_else(|| AppError::Validation(format!("Unknown evaluation item '{id}'")))?;
        if seen.insert(item.id) {
            total += item.points;
        }
    }

    Ok(ScoreResult {
        score: total,
        max_score: max_score(),
        feedback: feedback(total),
    })
}

pub fn feedback(score: u32) -> &'static str {
    if score >= 90 {
        "🎉 A flawless interview! Your chances of passing are very high."
    } else if score >= 80 {
        "✨ An excellent interview. You likely made a good impression."
    } else if score >= 70 {
        "👍 A solid interview. A few improvements would make it even better."
    } else if score >= 60 {
        "📝 An average interview. Work on the weaker areas."
    } else {
        "💪 More preparation is needed. Use the checklist to prepare again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_maxima_match_item_points() {
        for category in CRITERIA {
            let sum: u32 = category.items.iter().map(|i| i.points).sum();
            assert_eq!(sum, category.max_score, "{}", category.name);
        }
        assert_eq!(max_score(), 100);
    }

    #[test]
    fn test_all_items_checked_scores_100() {
        let all: Vec<String> = CRITERIA
            .iter()
            .flat_map(|c| c.items.iter())
            .map(|i| i.id.to_string())
            .collect();
        let result = score(&all).unwrap();
        assert_eq!(result.score, 100);
        assert!(result.feedback.contains("flawless"));
    }

    #[test]
    fn test_partial_checklist_and_tiers() {
        let result = score(&ids(&["core_questions", "common_questions", "answer_style"])).unwrap();
        assert_eq!(result.score, 55);
        assert!(result.feedback.contains("More preparation"));

        let result = score(&ids(&[
            "company_research",
            "resume_mastery",
            "self_intro",
            "core_questions",
            "common_questions",
        ]))
        .unwrap();
        assert_eq!(result.score, 70);
        assert!(result.feedback.contains("solid"));
    }

    #[test]
    fn test_duplicates_count_once() {
        let result = score(&ids(&["behavior", "behavior"])).unwrap();
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let err = score(&ids(&["self_intro", "charisma"])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_feedback_boundaries() {
        assert_eq!(feedback(90), feedback(100));
        assert_ne!(feedback(89), feedback(90));
        assert_ne!(feedback(79), feedback(80));
        assert_ne!(feedback(69), feedback(70));
        assert_ne!(feedback(59), feedback(60));
        assert_eq!(feedback(0), feedback(59));
    }
}
