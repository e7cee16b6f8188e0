use quick_xml::events::Event;
use quick_xml::Reader;

use super::LoaderError;

/// Minimal owned element tree, enough to answer the handful of
/// descendant/child lookups the record extractor needs.
#[derive(Clone, Debug, Default)]
pub(in crate::loader) struct Element {
    pub(in crate::loader) name: String,
    text: String,
    pub(in crate::loader) children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Concatenated text of this element and all its descendants.
    pub(in crate::loader) fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// First descendant with the given name, document order.
    pub(in crate::loader) fn find(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given name, document order.
    pub(in crate::loader) fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect_named(name, &mut out);
        out
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// `a > b > c` selection: every descendant `a`, then direct children
    /// `b`, then their direct children `c`.
    pub(in crate::loader) fn select<'a>(&'a self, path: &[&str]) -> Vec<&'a Element> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut current = self.find_all(first);
        for &step in rest {
            current = current
                .into_iter()
                .flat_map(move |el| el.children.iter().filter(move |c| c.name == step))
                .collect();
        }
        current
    }
}

/// Parse a whole document. The returned element is a synthetic root whose
/// children are the document's top-level elements.
pub(in crate::loader) fn parse_document(input: &str) -> Result<Element, LoaderError> {
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<Element> = vec![Element::new(String::new())];

    loop {
        let event = reader.read_event().map_err(|e| LoaderError::Xml {
            message: e.to_string(),
        })?;
        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                stack.push(Element::new(name));
            }
            Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Element::new(name));
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(LoaderError::Xml {
                        message: "unexpected closing tag".to_string(),
                    });
                }
                if let Some(done) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(done);
                    }
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| LoaderError::Xml {
                    message: e.to_string(),
                })?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
        return Err(LoaderError::UnclosedElement { name: open });
    }
    let root = stack.pop().unwrap_or_default();
    if root.children.is_empty() {
        return Err(LoaderError::Xml {
            message: "document has no root element".to_string(),
        });
    }
    Ok(root)
}
