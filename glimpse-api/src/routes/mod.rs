pub(crate) mod error;
pub(crate) mod history;
pub(crate) mod search;
pub(crate) mod top_searches;

pub(crate) use error::ApiError;
