pub mod document;
pub mod element;
pub mod event;
pub mod selector;

pub use document::Document;
pub use element::{find_element, find_element_mut, Element, InputType, Tag};
pub use event::Event;
pub use selector::{Selector, SelectorError};
