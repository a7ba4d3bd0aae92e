pub mod fields;
pub mod scan;
pub mod ticket;

#[cfg(test)]
pub(crate) mod testing;
