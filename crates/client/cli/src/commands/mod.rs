mod roster;
mod simulate;

pub use roster::ShowRoster;
pub use simulate::Simulate;
