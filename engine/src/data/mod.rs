pub mod csv_parser;
pub mod financial_table;
pub mod normalizer;
