/*!
 * Resource tree model.
 *
 * `ResourceTree` is what the source file parses into, `OutputTree` is what one
 * target language serializes from. Texts in an `OutputTree` are final: they
 * are escaped for the resource format exactly once, when they enter the
 * result map, and written as-is.
 */

use quick_xml::escape::partial_escape;

/// Text value of a resource entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceText {
    /// Decoded text content, trimmed; what gets translated
    pub text: String,
    /// Verbatim inner XML; what a passthrough copy writes back
    pub raw: String,
}

impl ResourceText {
    /// Build a value from plain text, deriving the raw form
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let raw = partial_escape(text.as_str()).into_owned();
        Self { text, raw }
    }

    /// Build a value with an explicit raw form
    pub fn with_raw(text: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: raw.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A quantity-keyed element of a plurals group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedItem {
    /// Quantity key (`one`, `few`, `other`...)
    pub quantity: String,
    pub value: ResourceText,
}

impl KeyedItem {
    pub fn new(quantity: impl Into<String>, value: ResourceText) -> Self {
        Self {
            quantity: quantity.into(),
            value,
        }
    }
}

/// A typed entry of the source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceNode {
    /// XML comment, text without the delimiters
    Comment(String),

    /// `<string name="...">`
    Leaf {
        name: String,
        value: ResourceText,
        translatable: bool,
    },

    /// `<string-array name="...">` with `<item>` children
    OrderedGroup {
        name: String,
        items: Vec<ResourceText>,
        translatable: bool,
    },

    /// `<plurals name="...">` with `<item quantity="...">` children
    KeyedGroup {
        name: String,
        items: Vec<KeyedItem>,
        translatable: bool,
    },

    /// Any other resource element kept verbatim
    Unsupported {
        tag: String,
        name: String,
        attributes: Vec<(String, String)>,
        inner_xml: String,
    },
}

impl ResourceNode {
    /// Convenience constructor for a translatable leaf
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Leaf {
            name: name.into(),
            value: ResourceText::plain(text),
            translatable: true,
        }
    }

    /// Convenience constructor for a translatable ordered group
    pub fn ordered<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OrderedGroup {
            name: name.into(),
            items: items.into_iter().map(ResourceText::plain).collect(),
            translatable: true,
        }
    }

    /// Convenience constructor for a translatable keyed group
    pub fn keyed<I, K, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self::KeyedGroup {
            name: name.into(),
            items: items
                .into_iter()
                .map(|(quantity, text)| KeyedItem::new(quantity, ResourceText::plain(text)))
                .collect(),
            translatable: true,
        }
    }

    /// Resource name, `None` for comments
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Comment(_) => None,
            Self::Leaf { name, .. }
            | Self::OrderedGroup { name, .. }
            | Self::KeyedGroup { name, .. }
            | Self::Unsupported { name, .. } => Some(name),
        }
    }

    /// Element tag this node serializes as
    pub fn tag(&self) -> &str {
        match self {
            Self::Comment(_) => "#comment",
            Self::Leaf { .. } => "string",
            Self::OrderedGroup { .. } => "string-array",
            Self::KeyedGroup { .. } => "plurals",
            Self::Unsupported { tag, .. } => tag,
        }
    }

    pub fn is_translatable(&self) -> bool {
        match self {
            Self::Comment(_) | Self::Unsupported { .. } => false,
            Self::Leaf { translatable, .. }
            | Self::OrderedGroup { translatable, .. }
            | Self::KeyedGroup { translatable, .. } => *translatable,
        }
    }

    /// Mark a node `translatable="false"`; no effect on comments or unsupported tags
    pub fn non_translatable(mut self) -> Self {
        match &mut self {
            Self::Leaf { translatable, .. }
            | Self::OrderedGroup { translatable, .. }
            | Self::KeyedGroup { translatable, .. } => *translatable = false,
            Self::Comment(_) | Self::Unsupported { .. } => {}
        }
        self
    }
}

/// Parsed source resource file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceTree {
    pub nodes: Vec<ResourceNode>,
}

impl ResourceTree {
    pub fn new(nodes: Vec<ResourceNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of non-comment nodes
    pub fn resource_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !matches!(node, ResourceNode::Comment(_)))
            .count()
    }
}

/// Final text of one element plus its failure annotation, if any
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputItem {
    pub text: String,
    pub failure: Option<String>,
}

impl OutputItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    pub fn failed(text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: Some(annotation.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// An entry of a per-language output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
    Comment(String),
    /// Source node copied unchanged
    Passthrough(ResourceNode),
    Leaf {
        name: String,
        item: OutputItem,
    },
    OrderedGroup {
        name: String,
        items: Vec<OutputItem>,
    },
    KeyedGroup {
        name: String,
        items: Vec<(String, OutputItem)>,
    },
}

impl OutputNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Comment(_) => None,
            Self::Passthrough(node) => node.name(),
            Self::Leaf { name, .. }
            | Self::OrderedGroup { name, .. }
            | Self::KeyedGroup { name, .. } => Some(name),
        }
    }

    /// Number of elements carrying a failure annotation
    pub fn failed_count(&self) -> usize {
        match self {
            Self::Comment(_) | Self::Passthrough(_) => 0,
            Self::Leaf { item, .. } => usize::from(item.is_failed()),
            Self::OrderedGroup { items, .. } => items.iter().filter(|i| i.is_failed()).count(),
            Self::KeyedGroup { items, .. } => items.iter().filter(|(_, i)| i.is_failed()).count(),
        }
    }
}

/// Reconciled resource tree for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTree {
    pub language: String,
    pub nodes: Vec<OutputNode>,
}

impl OutputTree {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            nodes: Vec::new(),
        }
    }

    /// Number of non-comment entries; zero means the artifact should not exist
    pub fn meaningful_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| !matches!(node, OutputNode::Comment(_)))
            .count()
    }

    pub fn has_meaningful_entries(&self) -> bool {
        self.meaningful_count() > 0
    }

    pub fn failed_count(&self) -> usize {
        self.nodes.iter().map(OutputNode::failed_count).sum()
    }

    /// Find an entry by resource name
    pub fn find(&self, name: &str) -> Option<&OutputNode> {
        self.nodes.iter().find(|node| node.name() == Some(name))
    }
}
