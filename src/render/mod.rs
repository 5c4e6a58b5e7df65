pub(crate) mod frame;
pub(crate) mod snapshot;
pub(crate) mod surface;
