pub mod all_play;
pub mod categories;
pub mod fantrax;
pub mod metrics;
pub mod model;
pub mod transactions;
pub mod weekly;
