pub mod company;
pub mod interview;
pub mod record;
