//! Difficult-question bookkeeping for saved interviews.

use std::collections::HashSet;

use crate::models::interview::{ConversationRole, Message};

/// Keeps the ids that name an interviewer message, in first-seen order,
/// and drops duplicates.
pub fn sanitize_difficult_ids(messages: &[Message], ids: &[String]) -> Vec<String> {
    let assistant_ids: HashSet<&str> = messages
        .iter()
        .filter(|m| m.role == ConversationRole::Assistant && !m.id.is_empty())
        .map(|m| m.id.as_str())
        .collect();

    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| assistant_ids.contains(id.as_str()))
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Sets `isDifficult` on every message so it agrees with the id list.
pub fn mark_difficult(messages: &mut [Message], ids: &[String]) {
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    for message in messages.iter_mut() {
        message.is_difficult = match message.role {
            ConversationRole::Assistant => Some(ids.contains(message.id.as_str())),
            ConversationRole::User => None,
        };
    }
}

/// The interviewer questions the candidate flagged, in conversation order.
pub fn difficult_questions<'a>(messages: &'a [Message], ids: &[String]) -> Vec<&'a Message> {
    let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
    messages
        .iter()
        .filter(|m| m.role == ConversationRole::Assistant && ids.contains(m.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, role: ConversationRole) -> Message {
        Message {
            id: id.to_string(),
            role,
            content: format!("content {id}"),
            timestamp: None,
            is_difficult: None,
        }
    }

    fn conversation() -> Vec<Message> {
        vec![
            msg("a1", ConversationRole::Assistant),
            msg("u1", ConversationRole::User),
            msg("a2", ConversationRole::Assistant),
            msg("u2", ConversationRole::User),
            msg("a3", ConversationRole::Assistant),
        ]
    }

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sanitize_drops_unknown_user_and_duplicate_ids() {
        let cleaned = sanitize_difficult_ids(&conversation(), &ids(&["a3", "ghost", "u1", "a1", "a3"]));
        assert_eq!(cleaned, ids(&["a3", "a1"]));
    }

    #[test]
    fn test_sanitize_ignores_blank_message_ids() {
        let messages = vec![msg("", ConversationRole::Assistant)];
        assert!(sanitize_difficult_ids(&messages, &ids(&[""])).is_empty());
    }

    #[test]
    fn test_mark_difficult_flags_assistant_messages_only() {
        let mut messages = conversation();
        messages[1].is_difficult = Some(true);
        mark_difficult(&mut messages, &ids(&["a2"]));

        assert_eq!(messages[0].is_difficult, Some(false));
        assert_eq!(messages[1].is_difficult, None);
        assert_eq!(messages[2].is_difficult, Some(true));
    }

    #[test]
    fn test_difficult_questions_follow_conversation_order() {
        let messages = conversation();
        let flagged = difficult_questions(&messages, &ids(&["a3", "a1"]));
        let found: Vec<&str> = flagged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(found, vec!["a1", "a3"]);
    }
}
