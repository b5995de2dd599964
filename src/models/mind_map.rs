//! Mind map tree attached to a subject. Only the structure is kept here;
//! drawing it is up to the front end.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    pub fn leaf(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Single-node map used when a subject is created without one.
    pub fn root(text: impl Into<String>) -> Self {
        Self::leaf("root", text)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MindMapNode::node_count).sum::<usize>()
    }

    /// Indented plain-text rendering, two spaces per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str("- ");
        out.push_str(&self.text);
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MindMapNode {
        MindMapNode {
            id: "root".to_string(),
            text: "Photosynthesis".to_string(),
            children: vec![
                MindMapNode {
                    id: "1".to_string(),
                    text: "Light phase".to_string(),
                    children: vec![MindMapNode::leaf("1.1", "Thylakoids")],
                },
                MindMapNode::leaf("2", "Calvin cycle"),
            ],
        }
    }

    #[test]
    fn test_node_count() {
        assert_eq!(sample().node_count(), 4);
        assert_eq!(MindMapNode::root("x").node_count(), 1);
    }

    #[test]
    fn test_outline() {
        assert_eq!(
            sample().outline(),
            "- Photosynthesis\n  - Light phase\n    - Thylakoids\n  - Calvin cycle\n"
        );
    }

    #[test]
    fn test_children_are_optional_in_json() {
        let node: MindMapNode = serde_json::from_str(r#"{"id":"a","text":"Alone"}"#).unwrap();
        assert!(node.children.is_empty());
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"id":"a","text":"Alone"}"#);
    }
}
