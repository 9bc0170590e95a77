pub mod mapquest;

pub use mapquest::MapQuestGeocoder;
