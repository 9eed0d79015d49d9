//! Endpoint descriptors for the remote Bedrock Server Manager API.
//!
//! Each tool maps 1:1 to one descriptor: an HTTP method plus a path template.
//! Templates use `{}` placeholders which are substituted, in order, with
//! percent-encoded path parameters at request time.

use reqwest::Method;

/// Static description of how to reach one remote capability.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// Number of `{}` placeholders in the path template.
    pub fn arity(&self) -> usize {
        self.path.matches("{}").count()
    }

    /// Build the concrete URL by substituting placeholders with
    /// percent-encoded parameters.
    ///
    /// Panics if the number of parameters does not match the template; the
    /// descriptor table and its callers are both static, so a mismatch is a
    /// programming error caught by the endpoint table test below.
    pub fn url(&self, base_url: &str, params: &[&str]) -> String {
        assert_eq!(
            self.arity(),
            params.len(),
            "endpoint {} expects {} path parameters, got {}",
            self.path,
            self.arity(),
            params.len()
        );

        let mut url = String::with_capacity(base_url.len() + self.path.len() + 16);
        url.push_str(base_url);

        let mut rest = self.path;
        for param in params {
            let (head, tail) = rest
                .split_once("{}")
                .expect("placeholder count already checked");
            url.push_str(head);
            url.push_str(&urlencoding::encode(param));
            rest = tail;
        }
        url.push_str(rest);
        url
    }
}

// Authentication
pub static LOGIN: Endpoint = Endpoint::new(Method::POST, "/auth/token");
pub static LOGOUT: Endpoint = Endpoint::new(Method::GET, "/auth/logout");

// Server lifecycle
pub static SERVERS: Endpoint = Endpoint::new(Method::GET, "/api/servers");
pub static SERVER_STATUS: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/status");
pub static SERVER_START: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/start");
pub static SERVER_STOP: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/stop");
pub static SERVER_RESTART: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/restart");
pub static SERVER_SEND_COMMAND: Endpoint =
    Endpoint::new(Method::POST, "/api/server/{}/send_command");
pub static SERVER_UPDATE: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/update");
pub static SERVER_DELETE: Endpoint = Endpoint::new(Method::DELETE, "/api/server/{}/delete");
pub static SERVER_VALIDATE: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/validate");
pub static SERVER_VERSION: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/version");
pub static SERVER_PROCESS_INFO: Endpoint =
    Endpoint::new(Method::GET, "/api/server/{}/process_info");
pub static SERVER_CONFIG_STATUS: Endpoint =
    Endpoint::new(Method::GET, "/api/server/{}/config_status");
pub static SERVER_INSTALL: Endpoint = Endpoint::new(Method::POST, "/api/server/install");

// Allowlist
pub static ALLOWLIST_GET: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/allowlist/get");
pub static ALLOWLIST_ADD: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/allowlist/add");
pub static ALLOWLIST_REMOVE: Endpoint =
    Endpoint::new(Method::DELETE, "/api/server/{}/allowlist/remove");

// Player permissions
pub static PERMISSIONS_GET: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/permissions/get");
pub static PERMISSIONS_SET: Endpoint = Endpoint::new(Method::PUT, "/api/server/{}/permissions/set");

// Server properties
pub static PROPERTIES_GET: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/properties/get");
pub static PROPERTIES_SET: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/properties/set");

// Backups
pub static BACKUP_ACTION: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/backup/action");
pub static BACKUP_LIST: Endpoint = Endpoint::new(Method::GET, "/api/server/{}/backup/list/{}");
pub static BACKUPS_PRUNE: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/backups/prune");
pub static RESTORE_ACTION: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/restore/action");

// World and addons
pub static WORLD_EXPORT: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/world/export");
pub static WORLD_INSTALL: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/world/install");
pub static WORLD_RESET: Endpoint = Endpoint::new(Method::DELETE, "/api/server/{}/world/reset");
pub static ADDON_INSTALL: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/addon/install");
pub static CONTENT_WORLDS: Endpoint = Endpoint::new(Method::GET, "/api/content/worlds");
pub static CONTENT_ADDONS: Endpoint = Endpoint::new(Method::GET, "/api/content/addons");

// Global player list
pub static PLAYERS_GET: Endpoint = Endpoint::new(Method::GET, "/api/players/get");
pub static PLAYERS_ADD: Endpoint = Endpoint::new(Method::POST, "/api/players/add");
pub static PLAYERS_SCAN: Endpoint = Endpoint::new(Method::POST, "/api/players/scan");

// Plugins
pub static PLUGINS_LIST: Endpoint = Endpoint::new(Method::GET, "/api/plugins");
pub static PLUGIN_SET_ENABLED: Endpoint = Endpoint::new(Method::POST, "/api/plugins/{}");
pub static PLUGINS_RELOAD: Endpoint = Endpoint::new(Method::POST, "/api/plugins/reload");
pub static PLUGINS_TRIGGER_EVENT: Endpoint =
    Endpoint::new(Method::POST, "/api/plugins/trigger_event");

// Scheduled tasks
pub static CRON_ADD: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/cron_scheduler/add");
pub static CRON_MODIFY: Endpoint =
    Endpoint::new(Method::POST, "/api/server/{}/cron_scheduler/modify");
pub static CRON_DELETE: Endpoint =
    Endpoint::new(Method::DELETE, "/api/server/{}/cron_scheduler/delete");
pub static TASK_ADD: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/task_scheduler/add");
pub static TASK_DETAILS: Endpoint =
    Endpoint::new(Method::POST, "/api/server/{}/task_scheduler/details");
pub static TASK_MODIFY: Endpoint =
    Endpoint::new(Method::PUT, "/api/server/{}/task_scheduler/task/{}");
pub static TASK_DELETE: Endpoint =
    Endpoint::new(Method::DELETE, "/api/server/{}/task_scheduler/task/{}");

// System
pub static SYSTEM_INFO: Endpoint = Endpoint::new(Method::GET, "/api/info");
pub static SETTINGS_GET: Endpoint = Endpoint::new(Method::GET, "/api/settings");
pub static SETTINGS_SET: Endpoint = Endpoint::new(Method::POST, "/api/settings");
pub static SETTINGS_RELOAD: Endpoint = Endpoint::new(Method::POST, "/api/settings/reload");
pub static THEMES_GET: Endpoint = Endpoint::new(Method::GET, "/api/themes");
pub static DOWNLOADS_PRUNE: Endpoint = Endpoint::new(Method::POST, "/api/downloads/prune");
pub static SERVICE_UPDATE: Endpoint = Endpoint::new(Method::POST, "/api/server/{}/service/update");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_no_params() {
        let url = SERVERS.url("http://localhost:11325", &[]);
        assert_eq!(url, "http://localhost:11325/api/servers");
    }

    #[test]
    fn test_url_single_param() {
        let url = SERVER_START.url("http://localhost:11325", &["survival"]);
        assert_eq!(url, "http://localhost:11325/api/server/survival/start");
    }

    #[test]
    fn test_url_two_params() {
        let url = BACKUP_LIST.url("http://host", &["survival", "world"]);
        assert_eq!(url, "http://host/api/server/survival/backup/list/world");
    }

    #[test]
    fn test_url_encodes_path_params() {
        let url = SERVER_STOP.url("http://host", &["my world"]);
        assert_eq!(url, "http://host/api/server/my%20world/stop");
    }

    #[test]
    #[should_panic(expected = "expects 1 path parameters")]
    fn test_url_arity_mismatch_panics() {
        SERVER_START.url("http://host", &[]);
    }

    #[test]
    fn test_descriptors_borrow_as_static() {
        // Tool builders capture descriptors as `&'static Endpoint`; the
        // table items must live for the whole program, not as promoted
        // temporaries (reqwest::Method is not const-promotable).
        fn path_of(endpoint: &'static Endpoint) -> &'static str {
            endpoint.path
        }
        assert_eq!(path_of(&SERVERS), "/api/servers");
        assert_eq!(path_of(&SERVICE_UPDATE), "/api/server/{}/service/update");
    }

    #[test]
    fn test_arity() {
        assert_eq!(SERVERS.arity(), 0);
        assert_eq!(SERVER_START.arity(), 1);
        assert_eq!(TASK_MODIFY.arity(), 2);
    }
}
