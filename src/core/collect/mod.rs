//! Translator comment collection and association.

pub mod comments;

pub use comments::{CommentPattern, TranslatorComments};
