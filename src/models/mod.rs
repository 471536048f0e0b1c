mod bank;
mod statement;
mod transaction;

pub use bank::Bank;
pub use statement::Statement;
pub use transaction::Transaction;
