pub(crate) mod export;
pub(crate) mod input;
pub(crate) mod ops;
pub(crate) mod session;
pub(crate) mod state;
