pub mod crew;
pub mod money;
pub mod ports;
pub mod wallet;
