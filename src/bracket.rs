// 🏆 Bracket View - static tournament bracket layout
// A fixed visualization: three nodes, two edges. Not generated from athlete
// or category data and not linked to the scoring panels.

use serde::{Deserialize, Serialize};

// ============================================================================
// NODES AND EDGES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketNode {
    pub id: String,
    pub label: String,
    /// Fixed canvas position
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

// ============================================================================
// BRACKET
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bracket {
    pub nodes: Vec<BracketNode>,
    pub edges: Vec<BracketEdge>,
}

impl Bracket {
    /// The fixed demo layout: a final fed by two semi-finals.
    pub fn default_layout() -> Self {
        let nodes = vec![
            BracketNode {
                id: "final".to_string(),
                label: "Final Match".to_string(),
                x: 400.0,
                y: 0.0,
            },
            BracketNode {
                id: "semi1".to_string(),
                label: "Semi-Final 1".to_string(),
                x: 200.0,
                y: 100.0,
            },
            BracketNode {
                id: "semi2".to_string(),
                label: "Semi-Final 2".to_string(),
                x: 600.0,
                y: 100.0,
            },
        ];

        let edges = vec![
            BracketEdge {
                id: "semi1-final".to_string(),
                source: "semi1".to_string(),
                target: "final".to_string(),
                animated: true,
            },
            BracketEdge {
                id: "semi2-final".to_string(),
                source: "semi2".to_string(),
                target: "final".to_string(),
                animated: true,
            },
        ];

        Bracket { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&BracketNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges feeding into a node
    pub fn incoming(&self, node_id: &str) -> Vec<&BracketEdge> {
        self.edges.iter().filter(|e| e.target == node_id).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_shape() {
        let bracket = Bracket::default_layout();

        assert_eq!(bracket.nodes.len(), 3);
        assert_eq!(bracket.edges.len(), 2);

        let final_node = bracket.node("final").unwrap();
        assert_eq!(final_node.label, "Final Match");
        assert_eq!((final_node.x, final_node.y), (400.0, 0.0));

        assert_eq!(bracket.node("semi1").unwrap().x, 200.0);
        assert_eq!(bracket.node("semi2").unwrap().x, 600.0);
    }

    #[test]
    fn test_both_semis_feed_the_final() {
        let bracket = Bracket::default_layout();

        let incoming = bracket.incoming("final");
        assert_eq!(incoming.len(), 2);
        assert!(incoming.iter().all(|e| e.animated));

        let sources: Vec<&str> = incoming.iter().map(|e| e.source.as_str()).collect();
        assert!(sources.contains(&"semi1"));
        assert!(sources.contains(&"semi2"));
    }

    #[test]
    fn test_unknown_node() {
        let bracket = Bracket::default_layout();
        assert!(bracket.node("quarter1").is_none());
        assert!(bracket.incoming("quarter1").is_empty());
    }
}
