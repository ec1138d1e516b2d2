pub mod prompt;
pub mod selector;
pub mod theme;
pub mod widgets;

pub use prompt::{select_many, select_one};
pub use selector::{Outcome, SelectorState};
pub use theme::Theme;
