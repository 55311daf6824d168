pub(crate) mod proxy;
pub(crate) mod settings;
