pub mod diagnostics;
pub mod records;
