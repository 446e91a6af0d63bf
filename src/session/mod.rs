pub(crate) mod script;
#[allow(clippy::module_inception)]
pub(crate) mod session;
