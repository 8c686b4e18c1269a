pub mod pricing;
pub mod selection;
pub mod venue_loader;
