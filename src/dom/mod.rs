//! Mutable HTML documents for binding content into site templates.
//!
//! A [`Document`] keeps the template as a `scraper::Html`. Queries are plain
//! `scraper::Selector`s, edits go through the underlying `ego_tree` tree and
//! serialization is html5ever's. Lookups return `Result`/`Option` instead of
//! assuming the template contains what the caller expects.

mod error;

pub use error::DomError;
pub use scraper::Selector;

use ego_tree::{NodeMut, NodeRef};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node};

/// Handle to a node inside a [`Document`].
///
/// Nodes removed by [`Document::clear_children`] are recycled, so a handle
/// must not outlive the removal of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ego_tree::NodeId);

/// Parse a CSS selector.
pub fn selector(css: &str) -> Result<Selector, DomError> {
    Selector::parse(css).map_err(|e| DomError::InvalidQuery {
        query: css.to_string(),
        reason: e.to_string(),
    })
}

/// A mutable HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    /// Detached nodes waiting to be reused by the next insertion.
    free: Vec<ego_tree::NodeId>,
}

impl Document {
    /// Parse a complete HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(self.html.tree.root().id())
    }

    fn node(&self, node: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(node.0)
    }

    fn node_mut(&mut self, node: NodeId) -> Result<NodeMut<'_, Node>, DomError> {
        self.html.tree.get_mut(node.0).ok_or(DomError::UnknownNode)
    }

    fn element_ref(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.node(node).and_then(ElementRef::wrap)
    }

    fn element(&self, node: NodeId) -> Result<&Element, DomError> {
        self.element_ref(node)
            .map(|el| el.value())
            .ok_or(DomError::NotAnElement)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element_ref(node).is_some()
    }

    /// Local tag name, or `None` for non-element nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element_ref(node).map(|el| el.value().name())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent().map(|p| NodeId(p.id()))
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children().map(|c| NodeId(c.id())).collect())
            .unwrap_or_default()
    }

    /// Child nodes of `node` that are elements.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| {
                n.children()
                    .filter_map(ElementRef::wrap)
                    .map(|el| NodeId(el.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up an element by its `id` attribute.
    pub fn by_id(&self, id: &str) -> Result<NodeId, DomError> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
            .map(|el| NodeId(el.id()))
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    pub fn body(&self) -> Result<NodeId, DomError> {
        self.first_tag("body")
            .ok_or_else(|| DomError::NoMatch("body".to_string()))
    }

    fn first_tag(&self, tag: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag)
            .map(|el| NodeId(el.id()))
    }

    /// First element in document order matching `selector`.
    pub fn find(&self, selector: &Selector) -> Option<NodeId> {
        self.find_within(self.root(), selector)
    }

    /// First element strictly inside `scope` matching `selector`.
    pub fn find_within(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.select_within(scope, selector).next()
    }

    /// Every element matching `selector`, in document order.
    pub fn find_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.find_all_within(self.root(), selector)
    }

    pub fn find_all_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.select_within(scope, selector).collect()
    }

    /// Parse `css` and return every matching element.
    pub fn select(&self, css: &str) -> Result<Vec<NodeId>, DomError> {
        Ok(self.find_all(&selector(css)?))
    }

    fn select_within<'a>(
        &'a self,
        scope: NodeId,
        selector: &'a Selector,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.node(scope)
            .into_iter()
            .flat_map(|scope| scope.descendants().skip(1))
            .filter_map(ElementRef::wrap)
            .filter(move |el| selector.matches(el))
            .map(|el| NodeId(el.id()))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let start = self.node(node)?;
        std::iter::once(start)
            .chain(start.ancestors())
            .filter_map(ElementRef::wrap)
            .find(|el| selector.matches(el))
            .map(|el| NodeId(el.id()))
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.node(node).is_some_and(|n| {
            n.id() == ancestor.0 || n.ancestors().any(|a| a.id() == ancestor.0)
        })
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element_ref(node)
            .is_some_and(|el| selector.matches(&el))
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element_ref(node)?.value().attr(name)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.write_attr(node, name, Some(value))
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.write_attr(node, name, None)
    }

    fn write_attr(&mut self, node: NodeId, name: &str, value: Option<&str>) -> Result<(), DomError> {
        let current = self.element(node)?;
        let mut attrs = current.attrs.clone();
        let existing = attrs.iter().position(|(key, _)| &*key.local == name);
        match (existing, value) {
            (Some(i), Some(value)) => attrs[i].1 = value.into(),
            (Some(i), None) => {
                attrs.remove(i);
            }
            (None, Some(value)) => {
                let mut key = current.name.clone();
                key.prefix = None;
                key.ns = "".into();
                key.local = name.into();
                attrs.push((key, value.into()));
                // Element attribute lookups binary-search by name.
                attrs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
            }
            (None, None) => return Ok(()),
        }

        // A fresh element so the cached id and class lists are rebuilt.
        let mut element = Element::new(current.name.clone(), Vec::new());
        element.attrs = attrs;
        *self.node_mut(node)?.value() = Node::Element(element);
        Ok(())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_ok_and(|el| el.classes().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element(node)?;
        if el.classes().any(|c| c == class) {
            return Ok(());
        }
        let joined = match el.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &joined)
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element(node)?;
        if !el.classes().any(|c| c == class) {
            return Ok(());
        }
        let joined = el
            .attr("class")
            .unwrap_or("")
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node, "class", &joined)
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) -> Result<(), DomError> {
        if on {
            self.add_class(node, class)
        } else {
            self.remove_class(node, class)
        }
    }

    /// Read one declaration from the inline `style` attribute.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let style = self.attr(node, "style")?;
        parse_style(style)
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v)
    }

    /// Set (`Some`) or clear (`None`) one inline style declaration.
    pub fn set_style(
        &mut self,
        node: NodeId,
        property: &str,
        value: Option<&str>,
    ) -> Result<(), DomError> {
        let mut decls = parse_style(self.element(node)?.attr("style").unwrap_or(""));
        let existing = decls
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(property));
        match (existing, value) {
            (Some(i), Some(v)) => decls[i].1 = v.to_string(),
            (None, Some(v)) => decls.push((property.to_string(), v.to_string())),
            (Some(i), None) => {
                decls.remove(i);
            }
            (None, None) => return Ok(()),
        }

        if decls.is_empty() {
            self.remove_attr(node, "style")
        } else {
            let joined = decls
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr(node, "style", &joined)
        }
    }

    /// Concatenated text of every text node at or below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let Some(node) = self.node(node) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| match n.value() {
                Node::Text(text) => Some(&**text),
                _ => None,
            })
            .collect()
    }

    /// Replace the children of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element(node)?;
        self.clear_children(node);
        if !text.is_empty() {
            self.insert(node, Node::Text(Text { text: text.into() }))?;
        }
        Ok(())
    }

    /// `set_text` on the element with the given id.
    pub fn set_text_by_id(&mut self, id: &str, text: &str) -> Result<(), DomError> {
        let node = self.by_id(id)?;
        self.set_text(node, text)
    }

    /// Remove every child of `node`; the removed nodes are reused by later
    /// insertions.
    pub fn clear_children(&mut self, node: NodeId) {
        let Some(parent) = self.node(node) else {
            return;
        };
        let released: Vec<ego_tree::NodeId> =
            parent.descendants().skip(1).map(|n| n.id()).collect();
        for id in &released {
            if let Some(mut released) = self.html.tree.get_mut(*id) {
                released.detach();
            }
        }
        self.free.extend(released);
    }

    /// Nodes held by the document, including ones waiting for reuse.
    pub fn allocated_nodes(&self) -> usize {
        self.html.tree.values().count()
    }

    /// Parse `markup` as a fragment and append the resulting nodes to `node`.
    pub fn append_html(&mut self, node: NodeId, markup: &str) -> Result<(), DomError> {
        self.element(node)?;
        let fragment = Html::parse_fragment(markup);
        // html5ever wraps fragment content in a synthetic <html> element.
        for child in fragment.root_element().children() {
            self.graft(node, child)?;
        }
        Ok(())
    }

    /// Append a rule to the first `<style>` element, creating one at the end
    /// of `<head>` when the template has none.
    pub fn append_css_rule(&mut self, rule: &str) -> Result<(), DomError> {
        let style = match self.first_tag("style") {
            Some(style) => style,
            None => {
                let head = self
                    .first_tag("head")
                    .ok_or_else(|| DomError::NoMatch("head".to_string()))?;
                self.append_element(head, "style", "")?
            }
        };

        let mut css = self.text_content(style);
        if !css.is_empty() && !css.ends_with('\n') {
            css.push('\n');
        }
        css.push_str(rule);
        css.push('\n');
        self.set_text(style, &css)
    }

    /// Append an inline `<script>` at the end of `<body>`.
    pub fn append_body_script(&mut self, source: &str) -> Result<NodeId, DomError> {
        let body = self.body()?;
        self.append_element(body, "script", source)
    }

    /// Serialize the document back to HTML.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Append an attribute-less element in its parent's namespace.
    fn append_element(&mut self, parent: NodeId, name: &str, text: &str) -> Result<NodeId, DomError> {
        let mut qual = self.element(parent)?.name.clone();
        qual.local = name.into();
        let node = self.insert(parent, Node::Element(Element::new(qual, Vec::new())))?;
        if !text.is_empty() {
            self.insert(node, Node::Text(Text { text: text.into() }))?;
        }
        Ok(node)
    }

    /// Copy `source` and its subtree from another tree below `parent`.
    fn graft(&mut self, parent: NodeId, source: NodeRef<'_, Node>) -> Result<(), DomError> {
        let copy = self.insert(parent, source.value().clone())?;
        for child in source.children() {
            self.graft(copy, child)?;
        }
        Ok(())
    }

    /// Append `value` as the last child of `parent`, reusing a released node
    /// when one is available.
    fn insert(&mut self, parent: NodeId, value: Node) -> Result<NodeId, DomError> {
        let id = match self.free.pop() {
            Some(id) => {
                *self.node_mut(NodeId(id))?.value() = value;
                id
            }
            None => self.html.tree.orphan(value).id(),
        };
        self.node_mut(parent)?.append_id(id);
        Ok(NodeId(id))
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty()).then(|| (k.to_string(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title id="title-tag">Loading</title><style>body { margin: 0; }</style></head>
<body>
  <h1 id="header-title">Placeholder</h1>
  <ul id="list" class="cards"><li class="card active">One</li><li class="card">Two</li></ul>
</body></html>"#;

    fn sel(css: &str) -> Selector {
        selector(css).unwrap()
    }

    #[test]
    fn test_parse_and_lookup() {
        let doc = Document::parse(PAGE);
        let title = doc.by_id("header-title").unwrap();
        assert_eq!(doc.text_content(title), "Placeholder");
        assert_eq!(doc.tag_name(title), Some("h1"));
        assert_eq!(
            doc.by_id("missing"),
            Err(DomError::MissingElement("missing".to_string()))
        );
    }

    #[test]
    fn test_selectors() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.select("ul.cards > li.card").unwrap().len(), 2);
        assert_eq!(doc.select("li.card.active").unwrap().len(), 1);
        assert!(doc.select("li[data-x").is_err());

        let list = doc.by_id("list").unwrap();
        assert_eq!(doc.find_all_within(list, &sel("li")).len(), 2);
        assert_eq!(doc.find_within(list, &sel("ul")), None);
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut doc = Document::parse(PAGE);
        let list = doc.by_id("list").unwrap();
        doc.set_text(list, "<b>not markup</b>").unwrap();
        assert_eq!(doc.children(list).len(), 1);
        assert!(doc.find(&sel(".card")).is_none());
        assert!(doc.to_html().contains("&lt;b&gt;not markup&lt;/b&gt;"));
    }

    #[test]
    fn test_append_html() {
        let mut doc = Document::parse(PAGE);
        let list = doc.by_id("list").unwrap();
        doc.clear_children(list);
        doc.append_html(list, r#"<li class="card">A</li><li class="card">B</li><li class="card">C</li>"#)
            .unwrap();

        let cards = doc.find_all(&sel(".card"));
        assert_eq!(cards.len(), 3);
        assert_eq!(doc.text_content(cards[2]), "C");
        assert_eq!(doc.parent(cards[0]), Some(list));
        assert!(doc.find(&sel(".card.active")).is_none());
        assert!(doc
            .to_html()
            .contains(r#"<li class="card">A</li><li class="card">B</li>"#));
    }

    #[test]
    fn test_cleared_nodes_are_reused() {
        let mut doc = Document::parse(PAGE);
        let list = doc.by_id("list").unwrap();
        let markup = r#"<li class="card"><span>A</span></li><li class="card"><span>B</span></li>"#;
        doc.clear_children(list);
        doc.append_html(list, markup).unwrap();
        let allocated = doc.allocated_nodes();

        for _ in 0..500 {
            doc.clear_children(list);
            doc.append_html(list, markup).unwrap();
        }
        assert_eq!(doc.allocated_nodes(), allocated);
        assert_eq!(doc.find_all(&sel(".card span")).len(), 2);
    }

    #[test]
    fn test_class_manipulation() {
        let mut doc = Document::parse(PAGE);
        let cards = doc.find_all(&sel(".card"));
        doc.remove_class(cards[0], "active").unwrap();
        doc.add_class(cards[1], "active").unwrap();
        doc.add_class(cards[1], "active").unwrap();

        assert!(!doc.has_class(cards[0], "active"));
        assert_eq!(doc.attr(cards[1], "class"), Some("card active"));
        assert_eq!(doc.find_all(&sel(".active")), vec![cards[1]]);
    }

    #[test]
    fn test_attributes() {
        let mut doc = Document::parse(PAGE);
        let title = doc.by_id("header-title").unwrap();
        doc.set_attr(title, "title", "say \"hi\" & <go>").unwrap();
        doc.set_attr(title, "data-x", "1").unwrap();
        assert_eq!(doc.attr(title, "title"), Some("say \"hi\" & <go>"));
        assert!(doc.to_html().contains("say &quot;hi&quot; &amp; <go>"));
        assert!(doc.matches(title, &sel("h1[data-x='1']#header-title")));

        doc.remove_attr(title, "data-x").unwrap();
        assert_eq!(doc.attr(title, "data-x"), None);
        assert_eq!(doc.by_id("header-title"), Ok(title));

        let text = doc.children(title)[0];
        assert_eq!(doc.set_attr(text, "id", "x"), Err(DomError::NotAnElement));
    }

    #[test]
    fn test_inline_style() {
        let mut doc = Document::parse(PAGE);
        let list = doc.by_id("list").unwrap();
        doc.set_style(list, "transform", Some("translateX(-100%)"))
            .unwrap();
        doc.set_style(list, "max-height", Some("none")).unwrap();
        assert_eq!(doc.style(list, "transform").as_deref(), Some("translateX(-100%)"));

        doc.set_style(list, "transform", None).unwrap();
        doc.set_style(list, "max-height", None).unwrap();
        assert_eq!(doc.attr(list, "style"), None);
    }

    #[test]
    fn test_closest_and_descendant() {
        let doc = Document::parse(PAGE);
        let list = doc.by_id("list").unwrap();
        let card = doc.find(&sel(".card")).unwrap();
        let text = doc.children(card)[0];

        assert!(!doc.is_element(text));
        assert_eq!(doc.closest(text, &sel(".card")), Some(card));
        assert_eq!(doc.closest(text, &sel("ul")), Some(list));
        assert!(doc.is_inclusive_descendant(text, list));
        assert!(!doc.is_inclusive_descendant(list, card));
    }

    #[test]
    fn test_serialize_keeps_raw_text_and_void_elements() {
        let doc = Document::parse(
            r#"<!DOCTYPE html><html><head><meta charset="utf-8"><style>a > b { color: red; }</style></head><body><img src="a.png" alt="A"><script>if (a < b && c) {}</script></body></html>"#,
        );
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains(r#"<meta charset="utf-8">"#));
        assert!(!html.contains("</img>"));
        assert!(html.contains("<style>a > b { color: red; }</style>"));
        assert!(html.contains("<script>if (a < b && c) {}</script>"));
    }

    #[test]
    fn test_append_css_rule_uses_first_stylesheet() {
        let mut doc = Document::parse(PAGE);
        doc.append_css_rule("header::before { color: red; }").unwrap();
        let html = doc.to_html();
        assert!(html.contains("body { margin: 0; }\nheader::before { color: red; }"));
    }

    #[test]
    fn test_append_css_rule_creates_stylesheet() {
        let mut doc = Document::parse("<html><head></head><body></body></html>");
        doc.append_css_rule("p { color: blue; }").unwrap();
        assert!(doc.to_html().contains("<style>p { color: blue; }\n</style>"));
    }

    #[test]
    fn test_append_body_script() {
        let mut doc = Document::parse("<html><head></head><body><p>x</p></body></html>");
        doc.append_body_script("init(\"a\" < 1);").unwrap();
        assert!(doc
            .to_html()
            .ends_with("<p>x</p><script>init(\"a\" < 1);</script></body></html>"));
    }
}
