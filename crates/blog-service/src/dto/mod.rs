//! Validated user input

pub mod forms;

pub use forms::{LoginForm, PostForm, RegistrationForm};
