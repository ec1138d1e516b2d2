pub mod selector;

pub use selector::SelectorWidget;
