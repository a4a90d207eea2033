mod config;
mod types;

pub(crate) use config::{DB_TABLE_PRINCIPALS, GENERIC_DATA_STORE};
