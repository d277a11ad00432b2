mod controller;

pub use controller::{ComboSession, FetchRequest, FetchTicket, Mode};
