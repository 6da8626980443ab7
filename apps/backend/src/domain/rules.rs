pub const SEATS: usize = 4;
pub const HAND_SIZE: usize = 13;
pub const TRICK_SIZE: usize = 4;

/// A team wins outright when its cumulative score reaches this value.
pub const WIN_THRESHOLD: i32 = 1000;
/// A team loses (the opponents win) when its cumulative score collapses to this value.
pub const LOSS_THRESHOLD: i32 = -1000;
