pub mod constants;
#[cfg(test)]
pub mod test_helpers;
pub mod templates;
pub mod types;
pub mod validation;
