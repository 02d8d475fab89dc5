pub(crate) mod backend;
pub(crate) mod compositor;
pub(crate) mod gradient;
pub(crate) mod overlay;
pub(crate) mod surface;
pub(crate) mod text;
pub(crate) mod texture;
