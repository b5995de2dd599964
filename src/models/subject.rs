//! Subject is a mind map built from a learner's notes, plus its review schedule.
use super::{MindMapNode, ReviewState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    pub context: String,
    pub raw_notes: String,
    pub mind_map: MindMapNode,
    pub created_at: DateTime<Utc>,
    pub review: ReviewState,
}

/// Input for creating a subject. Without a mind map, a single root node
/// carrying the title is stored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub title: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub raw_notes: String,
    #[serde(default)]
    pub mind_map: Option<MindMapNode>,
}

impl SubjectDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn mind_map_or_root(&self) -> MindMapNode {
        self.mind_map
            .clone()
            .unwrap_or_else(|| MindMapNode::root(self.title.clone()))
    }
}

impl From<&Subject> for SubjectDraft {
    fn from(subject: &Subject) -> Self {
        Self {
            title: subject.title.clone(),
            context: subject.context.clone(),
            raw_notes: subject.raw_notes.clone(),
            mind_map: Some(subject.mind_map.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_without_mind_map_uses_title_root() {
        let draft = SubjectDraft::new("Cell biology");
        let map = draft.mind_map_or_root();
        assert_eq!(map.text, "Cell biology");
        assert!(map.children.is_empty());
    }

    #[test]
    fn test_draft_keeps_given_mind_map() {
        let draft = SubjectDraft {
            mind_map: Some(MindMapNode::leaf("n1", "Mitosis")),
            ..SubjectDraft::new("Cell biology")
        };
        assert_eq!(draft.mind_map_or_root().text, "Mitosis");
    }
}
