pub(crate) mod ext;
