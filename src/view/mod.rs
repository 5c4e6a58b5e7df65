pub(crate) mod reflection_view;
pub(crate) mod surface;
