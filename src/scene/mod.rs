pub(crate) mod container;
pub(crate) mod element;
pub(crate) mod image;
