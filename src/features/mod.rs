pub mod pages;
pub mod records;
