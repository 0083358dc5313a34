use crate::ElementId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageView {
    pub in_flight: usize,
    pub confirmed: Vec<ElementId>,
    pub dirty: bool,
}
