pub(crate) mod editor;
pub(crate) mod input;
