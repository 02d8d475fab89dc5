pub(crate) mod background;
pub(crate) mod compress;
pub(crate) mod decorations;
pub(crate) mod dominant;
pub(crate) mod palette;
