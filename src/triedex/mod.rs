pub(crate) mod catalog;
pub(crate) mod utils;
pub(crate) mod wordcount;
