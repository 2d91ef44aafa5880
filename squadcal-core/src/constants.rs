/// Duration used whenever the requested one is missing or not a positive number.
pub const DEFAULT_DURATION_MINUTES: i64 = 90;

pub const DEFAULT_SESSION_TITLE: &str = "New session";
pub const DEFAULT_GAME_TITLE: &str = "New game";

pub const DEFAULT_SQUAD: &str = "First Team";
pub const DEFAULT_COACH: &str = "Coach";

/// Age group assigned to athletes whose squad name carries no `U<digits>` token.
pub const DEFAULT_AGE_GROUP: &str = "U21";

pub const EVENT_TEXT_COLOR: &str = "#ffffff";
