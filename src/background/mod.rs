pub(crate) mod controller;
pub(crate) mod pipeline;
pub(crate) mod presentation;
pub(crate) mod score;
