use crate::error::SubstegoError;

pub type Result<T> = std::result::Result<T, SubstegoError>;
