pub mod adaptive;
pub mod hma;
pub mod wma;
