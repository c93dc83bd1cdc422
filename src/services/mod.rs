pub mod classifier;
pub mod columns;
pub mod criteria;
pub mod fund_extractor;
pub mod investees;
pub mod money;
pub mod narrative;
pub mod transactions;
pub mod vocabulary;
