pub mod daily;
pub mod duration;
pub mod overlap;
pub mod period;
pub mod rest;

#[cfg(test)]
pub(crate) mod test_support;
