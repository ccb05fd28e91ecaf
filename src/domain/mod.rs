// Domain layer: listing model and the ports the scraper talks through.

pub mod model;
pub mod ports;
