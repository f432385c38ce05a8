//! Lightweight element tree and HTML serialization
//!
//! Render output is a tree of [`Element`] nodes rather than a string, so
//! callers (tests included) can inspect structure, attributes and inline
//! styles before deciding how to emit it. Serialization via [`Display`] or
//! [`Element::to_html`] produces minified HTML with standard text/attribute
//! escaping and void-element handling.
//!
//! # Examples
//!
//! ```
//! use respimg::Element;
//!
//! let figure = Element::new("figure")
//!   .with_attr("class", "hero")
//!   .with_child(Element::new("img").with_attr("src", "/a.jpg"));
//!
//! assert_eq!(figure.to_html(), r#"<figure class="hero"><img src="/a.jpg"></figure>"#);
//! ```
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

/// Tags serialized without a closing tag (and whose content model is empty).
const VOID_TAGS: [&str; 13] = [
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
  "source", "track", "wbr",
];

/// A child slot in the tree: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Element(Element),
  Text(String),
}

/// An element with ordered attributes, inline styles and children.
///
/// Attributes and styles keep insertion order; setting an existing name
/// replaces its value in place so serialization stays deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
  tag: String,
  attributes: Vec<(String, String)>,
  styles: Vec<(String, String)>,
  children: Vec<Node>,
}

impl Element {
  pub fn new(tag: impl Into<String>) -> Self {
    Self {
      tag: tag.into(),
      attributes: Vec::new(),
      styles: Vec::new(),
      children: Vec::new(),
    }
  }

  pub fn tag(&self) -> &str {
    &self.tag
  }

  /// Sets an attribute, replacing any previous value for the same name.
  pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
    let name = name.into();
    let value = value.into();
    if let Some(entry) = self.attributes.iter_mut().find(|entry| entry.0 == name) {
      entry.1 = value;
    } else {
      self.attributes.push((name, value));
    }
  }

  /// Chainable form of [`set_attr`](Self::set_attr).
  pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.set_attr(name, value);
    self
  }

  pub fn attr(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|entry| entry.0 == name)
      .map(|entry| entry.1.as_str())
  }

  /// Sets an inline style property, replacing any previous value.
  pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
    let property = property.into();
    let value = value.into();
    if let Some(entry) = self.styles.iter_mut().find(|entry| entry.0 == property) {
      entry.1 = value;
    } else {
      self.styles.push((property, value));
    }
  }

  /// Chainable form of [`set_style`](Self::set_style).
  pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
    self.set_style(property, value);
    self
  }

  pub fn style_value(&self, property: &str) -> Option<&str> {
    self
      .styles
      .iter()
      .find(|entry| entry.0 == property)
      .map(|entry| entry.1.as_str())
  }

  pub fn push_child(&mut self, child: Element) {
    self.children.push(Node::Element(child));
  }

  /// Chainable form of [`push_child`](Self::push_child).
  pub fn with_child(mut self, child: Element) -> Self {
    self.push_child(child);
    self
  }

  pub fn push_text(&mut self, text: impl Into<String>) {
    self.children.push(Node::Text(text.into()));
  }

  /// Chainable form of [`push_text`](Self::push_text).
  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.push_text(text);
    self
  }

  pub fn children(&self) -> &[Node] {
    &self.children
  }

  /// Iterates over direct element children, skipping text runs.
  pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      Node::Text(_) => None,
    })
  }

  /// Finds the first descendant with the given tag, depth first.
  pub fn find(&self, tag: &str) -> Option<&Element> {
    for child in self.child_elements() {
      if child.tag == tag {
        return Some(child);
      }
      if let Some(found) = child.find(tag) {
        return Some(found);
      }
    }
    None
  }

  /// Collects every descendant with the given tag, depth first.
  pub fn find_all(&self, tag: &str) -> Vec<&Element> {
    let mut found = Vec::new();
    self.collect_all(tag, &mut found);
    found
  }

  fn collect_all<'tree>(&'tree self, tag: &str, found: &mut Vec<&'tree Element>) {
    for child in self.child_elements() {
      if child.tag == tag {
        found.push(child);
      }
      child.collect_all(tag, found);
    }
  }

  /// Serializes the subtree to minified HTML.
  pub fn to_html(&self) -> String {
    self.to_string()
  }

  fn write_html<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(&self.tag)?;
    for (name, value) in &self.attributes {
      write!(out, " {name}=\"")?;
      write_escaped_attr(out, value)?;
      out.write_char('"')?;
    }
    if !self.styles.is_empty() {
      out.write_str(" style=\"")?;
      for (index, (property, value)) in self.styles.iter().enumerate() {
        if index > 0 {
          out.write_char(';')?;
        }
        write!(out, "{property}:")?;
        write_escaped_attr(out, value)?;
      }
      out.write_char('"')?;
    }
    out.write_char('>')?;

    let void = VOID_TAGS.contains(&self.tag.as_str());
    if void && self.children.is_empty() {
      return Ok(());
    }
    for child in &self.children {
      match child {
        Node::Element(element) => element.write_html(out)?,
        Node::Text(text) => write_escaped_text(out, text)?,
      }
    }
    write!(out, "</{}>", self.tag)
  }
}

impl fmt::Display for Element {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write_html(f)
  }
}

fn write_escaped_text<W: fmt::Write>(out: &mut W, text: &str) -> fmt::Result {
  for ch in text.chars() {
    match ch {
      '&' => out.write_str("&amp;")?,
      '<' => out.write_str("&lt;")?,
      '>' => out.write_str("&gt;")?,
      other => out.write_char(other)?,
    }
  }
  Ok(())
}

fn write_escaped_attr<W: fmt::Write>(out: &mut W, value: &str) -> fmt::Result {
  for ch in value.chars() {
    match ch {
      '&' => out.write_str("&amp;")?,
      '<' => out.write_str("&lt;")?,
      '>' => out.write_str("&gt;")?,
      '"' => out.write_str("&quot;")?,
      other => out.write_char(other)?,
    }
  }
  Ok(())
}
