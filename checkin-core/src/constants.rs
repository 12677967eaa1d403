//! Protocol constants for the check-in backend

/// Number of tiles on a user's quote board.
pub const TILE_COUNT: usize = 12;

/// Length of the fixed quote rotation. The per-user cursor wraps at this
/// value.
pub const QUOTE_CYCLE_LEN: u8 = 50;

/// Cooldown, in hours, between completing a 12/12 board and the board
/// becoming eligible for reset.
pub const RESET_COOLDOWN_HOURS: i64 = 24;

/// Lowest value a director may set a daily cap to.
pub const MIN_DAILY_CAP: u32 = 1;

/// Highest value a director may set a daily cap to.
pub const MAX_DAILY_CAP: u32 = 999;

/// Daily cap used when no setting row exists or the store is unreachable.
pub const DEFAULT_DAILY_CAP: u32 = 1;

/// House points credited for a successful check-in.
pub const CHECKIN_POINTS: i64 = 1;

/// House points credited for a journal entry.
pub const JOURNAL_POINTS: i64 = 2;

/// House points credited for flipping a tile.
pub const FLIP_POINTS: i64 = 1;

/// Upper bound on journal entry length, in characters.
pub const MAX_JOURNAL_LEN: usize = 4000;

/// Upper bound on message body length, in characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Upper bound on a mood label, in characters.
pub const MAX_MOOD_LEN: usize = 32;
