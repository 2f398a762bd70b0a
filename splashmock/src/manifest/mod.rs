pub(crate) mod bundled;
pub(crate) mod model;
