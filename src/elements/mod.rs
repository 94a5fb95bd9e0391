/// Shared element contract every role builds on
pub mod base;
/// Script-click button
pub mod button;
/// Idempotent checkbox
pub mod checkbox;
/// Label accessors
pub mod label;
/// Script-click link
pub mod link;
/// Idempotent radio button
pub mod radio;
/// Single/multi select semantics
pub mod select;
/// Structural table traversal
pub mod table;
/// Text input with slow-path typing
pub mod text_input;

pub use base::Element;
pub use button::Button;
pub use checkbox::CheckBox;
pub use label::Label;
pub use link::Link;
pub use radio::Radio;
pub use select::Select;
pub use table::Table;
pub use text_input::TextInput;
