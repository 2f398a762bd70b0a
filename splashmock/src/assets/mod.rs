pub(crate) mod icon_source;
