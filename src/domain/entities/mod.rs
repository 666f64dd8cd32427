pub mod dates;
pub mod hr;
pub mod mutation;
pub mod query;
pub mod row;
pub mod status;
pub mod table;
