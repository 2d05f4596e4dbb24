//! Section, key and setting names.

/// `[HTTP Server]`
pub const HTTP_SERVER: &str = "HTTP Server";
/// `[Microsoft Teams]`, one key per outbound connector.
pub const MICROSOFT_TEAMS: &str = "Microsoft Teams";
/// `[Log]`
pub const LOG: &str = "Log";
/// `[Template]`
pub const TEMPLATE: &str = "Template";
/// `[Group Alerts]`
pub const GROUP_ALERTS: &str = "Group Alerts";

pub const HOST: &str = "Host";
pub const PORT: &str = "Port";
pub const LEVEL: &str = "Level";
pub const PATH: &str = "Path";
pub const RENDER_LIST: &str = "RenderList";
pub const FIELD: &str = "Field";

/// Stable names under which resolved settings are exposed to the host.
pub mod setting {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const TEMPLATE_PATH: &str = "TEMPLATE_PATH";
    pub const TEMPLATE_RENDER_LIST: &str = "TEMPLATE_RENDER_LIST";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FILE_PATH: &str = "LOG_FILE_PATH";
    pub const GROUP_ALERTS_BY: &str = "GROUP_ALERTS_BY";
    pub const MICROSOFT_TEAMS: &str = "MICROSOFT_TEAMS";
}
