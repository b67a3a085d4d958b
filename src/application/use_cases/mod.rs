pub mod cleaning;
pub mod conversion;
pub mod projection;
pub mod sweep;
pub mod visualization;
