//! Template catalog: the owner/variant tree and its flattened name lookup.
//!
//! Owners group variants. Any node carrying a locator is a selectable
//! template, and the flattened [`TemplateCatalog`] maps every such node's
//! name to its locator regardless of depth.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display colour attached to a catalog node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    #[default]
    Reset,
    Yellow,
    Blue,
    Magenta,
    Green,
    Red,
    Cyan,
}

/// A node in the owner/variant tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateNode {
    /// Display name, also the flat catalog key
    pub name: String,

    /// Colour used when listing the node
    #[serde(default)]
    pub color: ColorTag,

    /// Variants grouped under this node
    #[serde(default, alias = "variants", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TemplateNode>,

    /// Repository locator handed to the version-control client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

impl TemplateNode {
    /// Create a grouping node
    pub fn owner(name: impl Into<String>, color: ColorTag, children: Vec<TemplateNode>) -> Self {
        Self {
            name: name.into(),
            color,
            children,
            locator: None,
        }
    }

    /// Create a selectable leaf
    pub fn variant(name: impl Into<String>, color: ColorTag, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            children: Vec::new(),
            locator: Some(locator.into()),
        }
    }

    /// Whether the node can be cloned directly
    pub fn is_selectable(&self) -> bool {
        self.locator.is_some()
    }

    /// Whether choosing this node leads to a variant prompt
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The owners shipped with the binary
pub fn builtin_owners() -> Vec<TemplateNode> {
    vec![
        TemplateNode::owner(
            "antfu",
            ColorTag::Yellow,
            vec![
                TemplateNode::variant(
                    "vitesse",
                    ColorTag::Yellow,
                    "git@github.com:antfu/vitesse.git",
                ),
                TemplateNode::variant(
                    "vitesse-lite",
                    ColorTag::Blue,
                    "git@github.com:antfu/vitesse-lite.git",
                ),
                TemplateNode::variant(
                    "starter-ts",
                    ColorTag::Magenta,
                    "git@github.com:antfu/starter-ts.git",
                ),
            ],
        ),
        TemplateNode::owner(
            "chinbor",
            ColorTag::Yellow,
            vec![TemplateNode::variant(
                "starter-wechat",
                ColorTag::Yellow,
                "git@github.com:chinbor/starter-wechat-applet.git",
            )],
        ),
    ]
}

/// Flattened, immutable name → locator lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCatalog {
    entries: BTreeMap<String, String>,
}

impl TemplateCatalog {
    /// Build the lookup by a depth-first walk of the tree.
    ///
    /// Later nodes overwrite earlier ones on a name collision.
    pub fn from_tree(nodes: &[TemplateNode]) -> Self {
        let mut entries = BTreeMap::new();
        collect(nodes, &mut entries);
        Self { entries }
    }

    /// Look up a template locator by flat name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Template names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn collect(nodes: &[TemplateNode], entries: &mut BTreeMap<String, String>) {
    for node in nodes {
        if let Some(locator) = &node.locator {
            entries.insert(node.name.clone(), locator.clone());
        }
        collect(&node.children, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_only_variants() {
        let catalog = TemplateCatalog::from_tree(&builtin_owners());

        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get("vitesse"),
            Some("git@github.com:antfu/vitesse.git")
        );
        assert_eq!(
            catalog.get("vitesse-lite"),
            Some("git@github.com:antfu/vitesse-lite.git")
        );
        assert_eq!(
            catalog.get("starter-ts"),
            Some("git@github.com:antfu/starter-ts.git")
        );
        assert_eq!(
            catalog.get("starter-wechat"),
            Some("git@github.com:chinbor/starter-wechat-applet.git")
        );
        assert!(!catalog.contains("antfu"));
        assert!(!catalog.contains("chinbor"));
    }

    #[test]
    fn test_owner_with_locator_is_registered() {
        let mut owner = TemplateNode::owner(
            "solo",
            ColorTag::Green,
            vec![TemplateNode::variant("child", ColorTag::Red, "child.git")],
        );
        owner.locator = Some("solo.git".to_string());

        let catalog = TemplateCatalog::from_tree(&[owner]);
        assert_eq!(catalog.get("solo"), Some("solo.git"));
        assert_eq!(catalog.get("child"), Some("child.git"));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let tree = vec![
            TemplateNode::owner(
                "a",
                ColorTag::Yellow,
                vec![TemplateNode::variant("dup", ColorTag::Yellow, "first.git")],
            ),
            TemplateNode::owner(
                "b",
                ColorTag::Yellow,
                vec![TemplateNode::variant("dup", ColorTag::Yellow, "second.git")],
            ),
        ];

        let catalog = TemplateCatalog::from_tree(&tree);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dup"), Some("second.git"));
    }

    #[test]
    fn test_deserialize_owner_with_variants_alias() {
        let yaml = r#"
name: me
color: green
variants:
  - name: my-template
    locator: https://example.com/me/my-template.git
"#;
        let node: TemplateNode = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(node.color, ColorTag::Green);
        assert!(node.has_children());
        assert!(!node.is_selectable());
        assert!(node.children[0].is_selectable());
    }

    #[test]
    fn test_empty_tree() {
        let catalog = TemplateCatalog::from_tree(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.names().count(), 0);
    }
}
