pub(crate) mod analytics;
pub(crate) mod chat;
pub(crate) mod dashboard;
pub(crate) mod upload;
