pub(crate) mod discover;
pub(crate) mod markers;
