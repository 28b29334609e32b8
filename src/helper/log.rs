use std::fmt::Display;

use crate::telegraph::node::Node;

/// Log prefix for an API method, e.g. `[createPage]`.
pub struct LogCall<'a>(pub &'a str);

impl<'a> Display for LogCall<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Short summary of a page body: node count and text length.
pub struct LogContent<'a>(pub &'a [Node]);

impl<'a> Display for LogContent<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let content = self.0;
        let mut elements = 0;
        let mut chars = 0;
        for node in content {
            count(node, &mut elements, &mut chars);
        }
        write!(f, " ({} top-level nodes, {} elements, {} chars)", content.len(), elements, chars)
    }
}

fn count(node: &Node, elements: &mut usize, chars: &mut usize) {
    match node {
        Node::Text(text) => *chars += text.chars().count(),
        Node::Element(element) => {
            *elements += 1;
            for child in &element.children {
                count(child, elements, chars);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegraph::node::NodeElement;

    #[test]
    fn test_log_call() {
        assert_eq!(LogCall("getViews").to_string(), "[getViews]");
    }

    #[test]
    fn test_log_content() {
        let content = vec![
            NodeElement::h4("Preview").into(),
            NodeElement::paragraph(vec![NodeElement::link("ab", Some("https://x")).into()]).into(),
            Node::from("xyz"),
        ];
        assert_eq!(LogContent(&content).to_string(), " (3 top-level nodes, 3 elements, 12 chars)");
    }
}
