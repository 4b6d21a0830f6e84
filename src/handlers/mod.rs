pub mod orders;
pub mod promotions;
