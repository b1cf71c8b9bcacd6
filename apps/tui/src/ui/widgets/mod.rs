pub mod badges;
pub mod charts;
pub mod help;
pub mod map;
pub mod popup;
pub mod status;
pub mod tables;
