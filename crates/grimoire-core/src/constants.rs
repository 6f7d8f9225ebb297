//! Application-wide constants

pub mod app {
    /// Key under which the scenario collection is stored
    pub const STORAGE_KEY: &str = "rpg-skills-t20";

    /// Suffix appended to the storage key for the active-scenario record
    pub const ACTIVE_SUFFIX: &str = ":active";

    /// Directory name under the user's home
    pub const CONFIG_DIR_NAME: &str = ".grimoire";

    pub const DATABASE_FILE: &str = "grimoire.db";
    pub const CONFIG_FILE: &str = "config.toml";
}

pub mod ai {
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const SKILL_TEMPERATURE: f32 = 0.7;
    pub const SCENARIO_TEMPERATURE: f32 = 0.8;
    pub const TOP_P: f32 = 0.95;

    /// Environment variables checked for the API key, in order
    pub const API_KEY_ENV_VARS: &[&str] = &["GRIMOIRE_API_KEY", "GEMINI_API_KEY", "API_KEY"];
}
