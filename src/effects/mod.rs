pub(crate) mod composite;
pub(crate) mod gradient;
pub(crate) mod reflection;
pub(crate) mod shelf;
