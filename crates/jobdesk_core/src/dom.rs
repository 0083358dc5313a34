use std::fmt;
use std::path::PathBuf;

/// Handle to an element inside a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered set of class names with DOM token-list semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `class` attribute value. Duplicates keep their first position.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::new();
        for token in attr.split_ascii_whitespace() {
            list.add(token);
        }
        list
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.tokens.iter().any(|token| token == class_name)
    }

    pub fn add(&mut self, class_name: &str) {
        if !self.contains(class_name) {
            self.tokens.push(class_name.to_string());
        }
    }

    pub fn remove(&mut self, class_name: &str) {
        self.tokens.retain(|token| token != class_name);
    }

    /// Replace `old` with `new` in place. Returns `false` when `old` is absent.
    pub fn replace(&mut self, old: &str, new: &str) -> bool {
        let Some(index) = self.tokens.iter().position(|token| token == old) else {
            return false;
        };
        if self.contains(new) && old != new {
            self.tokens.remove(index);
        } else {
            self.tokens[index] = new.to_string();
        }
        true
    }

    /// First class starting with `prefix`, in insertion order.
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .find(|token| token.starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Url,
    Number,
    File,
}

/// Value and native constraint attributes of an `<input>`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputControl {
    pub input_type: InputType,
    pub value: String,
    pub files: Vec<PathBuf>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
}

impl InputControl {
    pub fn new(input_type: InputType) -> Self {
        Self {
            input_type,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ElementKind {
    #[default]
    Plain,
    Form,
    Input(InputControl),
    Image { src: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub dom_id: Option<String>,
    pub classes: ClassList,
    pub kind: ElementKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn input(&self) -> Option<&InputControl> {
        match &self.kind {
            ElementKind::Input(control) => Some(control),
            _ => None,
        }
    }
}

/// Arena-backed element tree standing in for the rendered document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element. `classes` is a `class` attribute value.
    pub fn create_element(&mut self, tag: &str, classes: &str, kind: ElementKind) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_string(),
            dom_id: None,
            classes: ClassList::parse(classes),
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    /// Returns `false` when either handle is unknown or the move would form a cycle.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.element(parent).is_none() || self.element(child).is_none() {
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            return false;
        }
        if let Some(old_parent) = self.elements[child.0].parent {
            self.elements[old_parent.0].children.retain(|id| *id != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
        true
    }

    pub fn set_dom_id(&mut self, id: ElementId, dom_id: &str) {
        if let Some(element) = self.element_mut(id) {
            element.dom_id = Some(dom_id.to_string());
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn class_list(&self, id: ElementId) -> Option<&ClassList> {
        self.element(id).map(|element| &element.classes)
    }

    pub fn class_list_mut(&mut self, id: ElementId) -> Option<&mut ClassList> {
        self.element_mut(id).map(|element| &mut element.classes)
    }

    pub fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)
            .and_then(|element| element.children.first().copied())
    }

    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|element| element.dom_id.as_deref() == Some(dom_id))
            .map(ElementId)
    }

    /// All elements carrying `class_name`, in creation order.
    pub fn elements_with_class(&self, class_name: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.classes.contains(class_name))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(root) = self.element(id) else {
            return out;
        };
        let mut stack: Vec<ElementId> = root.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(element) = self.element(next) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn image_src(&self, id: ElementId) -> Option<&str> {
        match &self.element(id)?.kind {
            ElementKind::Image { src } => src.as_deref(),
            _ => None,
        }
    }

    /// Set `src` on an image element. Returns `false` for other kinds.
    pub fn set_image_src(&mut self, id: ElementId, data_url: String) -> bool {
        match self.element_mut(id).map(|element| &mut element.kind) {
            Some(ElementKind::Image { src }) => {
                *src = Some(data_url);
                true
            }
            _ => false,
        }
    }

    fn is_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut cursor = self.element(of).and_then(Element::parent);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.element(id).and_then(Element::parent);
        }
        false
    }
}
