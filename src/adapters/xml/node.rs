//! Tagged node tree for metadata documents
//!
//! Every node is one of three explicit shapes, so traversal code never has to
//! guess whether a value is wrapped in a list. A [`Node::Sequence`] is always
//! looked through transparently: a single child and a sequence of children are
//! visited the same way.

/// One node of a parsed metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text content
    Scalar(String),
    /// Ordered group of sibling nodes
    Sequence(Vec<Node>),
    /// Markup element
    Element(Element),
}

/// A markup element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name as written, e.g. `mets:fileGrp`
    pub tag: String,

    /// Attributes in document order, qualified names as written
    pub attributes: Vec<(String, String)>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

/// Strip a namespace prefix (`mets:file` -> `file`)
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}

impl Node {
    /// The element this node holds, if any
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// All elements reachable at this level, looking through sequences
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(std::slice::from_ref(self), &mut out);
        out
    }
}

fn collect_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    for node in nodes {
        match node {
            Node::Element(element) => out.push(element),
            Node::Sequence(children) => collect_elements(children, out),
            Node::Scalar(_) => {}
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Scalar(text) => out.push_str(text),
            Node::Sequence(children) => collect_text(children, out),
            Node::Element(_) => {}
        }
    }
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name without namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.tag)
    }

    /// Whether the local tag name matches
    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// First attribute whose local name matches
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| local_name(name) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order, looking through sequences
    pub fn child_elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(&self.children, &mut out);
        out
    }

    /// Child elements with the given local name
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements()
            .into_iter()
            .filter(move |child| child.is(local))
    }

    /// Concatenated direct text content, `None` when there is none
    pub fn text(&self) -> Option<String> {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// A named property: the attribute if present, else the text of the first
    /// child element with that name. Blank values are treated as absent.
    pub fn field(&self, local: &str) -> Option<String> {
        self.attribute(local)
            .map(str::to_string)
            .or_else(|| self.children_named(local).next().and_then(Element::text))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
