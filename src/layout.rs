pub(crate) mod engine;
pub(crate) mod model;
pub(crate) mod random;
pub(crate) mod templates;
