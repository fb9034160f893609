//! Actions produced by key handling and applied by the app loop.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Input text changed
    QueryChanged(String),
    /// Submit control activated
    Submit,
    Quit,
    /// Key consumed, nothing to do
    Noop,
}
