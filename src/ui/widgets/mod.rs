// Custom widgets for the TUI

pub mod form;
pub mod progress;
pub mod select;
pub mod slider;
pub mod text_field;

pub use form::{Form, FormEvent};
pub use progress::{EnhancedProgress, ProgressState};
pub use select::Select;
pub use slider::Slider;
pub use text_field::TextField;
