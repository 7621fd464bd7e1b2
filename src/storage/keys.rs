pub const CLUBS_KEY: &str = "clubs";
pub const USERS_KEY: &str = "users";
pub const SESSION_KEY: &str = "session";
pub const SAVED_GAMES_KEY: &str = "saved-games";

#[must_use]
pub fn scores_key(holes: usize) -> String {
    format!("scores:{holes}")
}

#[must_use]
pub fn rounds_key(email: &str) -> String {
    format!("rounds:{email}")
}
