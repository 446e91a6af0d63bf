pub(crate) mod margin;
pub(crate) mod watcher;
