pub mod market;
pub mod profile;
pub mod roadmap;
pub mod skill;
