//! Inline bootstrap script
//!
//! The script body is static; everything variable is passed in through two
//! literals at the top: `CONFIG` (per deployment) and `BOOT` (the bootstrap
//! constants shared with [`crate::bootstrap`]).

use serde::Serialize;

use super::markup::script_literal;
use super::ClientConfig;
use crate::bootstrap::{
    UiState, CHATKIT_ELEMENT, COMPONENT_TIMEOUT_MESSAGE, DARK_CLASS, MAX_POLL_ATTEMPTS,
    POLL_INTERVAL, RETRY_ENTRY_POINT, SESSION_FAILURE_PREFIX, THEME_STORAGE_KEY,
};

const BOOTSTRAP_JS: &str = include_str!("bootstrap.js");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BootConstants {
    element: &'static str,
    poll_interval_ms: u64,
    max_attempts: u32,
    theme_key: &'static str,
    dark_class: &'static str,
    retry_entry_point: &'static str,
    timeout_message: &'static str,
    failure_prefix: &'static str,
    states: StateNames,
}

#[derive(Debug, Serialize)]
struct StateNames {
    loading: &'static str,
    error: &'static str,
    ready: &'static str,
}

impl BootConstants {
    fn current() -> Self {
        Self {
            element: CHATKIT_ELEMENT,
            poll_interval_ms: POLL_INTERVAL.as_millis() as u64,
            max_attempts: MAX_POLL_ATTEMPTS,
            theme_key: THEME_STORAGE_KEY,
            dark_class: DARK_CLASS,
            retry_entry_point: RETRY_ENTRY_POINT,
            timeout_message: COMPONENT_TIMEOUT_MESSAGE,
            failure_prefix: SESSION_FAILURE_PREFIX,
            states: StateNames {
                loading: UiState::Loading.as_str(),
                error: UiState::Error.as_str(),
                ready: UiState::Ready.as_str(),
            },
        }
    }
}

/// Build the self-invoking bootstrap script for `config`
pub fn bootstrap_script(config: &ClientConfig) -> serde_json::Result<String> {
    Ok(format!(
        "(function initializeChatKit() {{\n  const CONFIG = {};\n  const BOOT = {};\n\n{}}})();\n",
        script_literal(config)?,
        script_literal(&BootConstants::current())?,
        BOOTSTRAP_JS
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(greeting: &str) -> ClientConfig {
        ClientConfig {
            workflow_id: "wf_123".into(),
            session_endpoint: "/api/create-session".into(),
            placeholder: "Ask anything...".into(),
            greeting: greeting.into(),
        }
    }

    #[test]
    fn test_script_embeds_config_and_constants() {
        let script = bootstrap_script(&config("Hello")).unwrap();
        assert!(script.starts_with("(function initializeChatKit() {"));
        assert!(script.trim_end().ends_with("})();"));
        assert!(script.contains(r#""workflowId":"wf_123""#));
        assert!(script.contains(r#""sessionEndpoint":"/api/create-session""#));
        assert!(script.contains(r#""pollIntervalMs":100"#));
        assert!(script.contains(r#""maxAttempts":50"#));
        assert!(script.contains(r#""element":"openai-chatkit""#));
        assert!(script.contains(r#""retryEntryPoint":"retryChatKit""#));
        assert!(script.contains("customElements.get(BOOT.element)"));
    }

    /// Source of `initChatKit`, from its declaration to the retry hook
    fn init_chatkit_source() -> &'static str {
        let start = BOOTSTRAP_JS
            .find("async function initChatKit()")
            .expect("initChatKit is defined");
        let end = BOOTSTRAP_JS
            .find("window[BOOT.retryEntryPoint] = initChatKit;")
            .expect("retry entry point is installed");
        &BOOTSTRAP_JS[start..end]
    }

    fn position(source: &str, needle: &str) -> usize {
        source
            .find(needle)
            .unwrap_or_else(|| panic!("missing `{}` in bootstrap script", needle))
    }

    #[test]
    fn test_init_enters_loading_before_polling() {
        let init = init_chatkit_source();
        let loading = position(init, "setState(BOOT.states.loading);");
        assert!(loading < position(init, "await pollUntil("));
        assert!(loading < position(init, "await createSession()"));
    }

    #[test]
    fn test_init_is_guarded_against_reentry() {
        let init = init_chatkit_source();
        let guard = position(init, "if (inFlight) {");
        let claim = position(init, "inFlight = true;");
        assert!(guard < claim);
        assert!(claim < position(init, "setState(BOOT.states.loading);"));
        assert!(init.contains("} finally {\n      inFlight = false;"));
    }

    #[test]
    fn test_component_timeout_hides_retry_and_stops() {
        let init = init_chatkit_source();
        let timeout = position(init, "showError(BOOT.timeoutMessage, false);\n        return;");
        assert!(timeout < position(init, "await createSession()"));
    }

    #[test]
    fn test_mount_replaces_children_then_marks_ready() {
        let init = init_chatkit_source();
        let token = position(init, "element.sessionToken = session.client_secret;");
        let mount = position(init, "container.replaceChildren(element);");
        let ready = position(init, "setState(BOOT.states.ready);");
        assert!(token < mount && mount < ready);
        assert_eq!(init.matches("replaceChildren(").count(), 1);
        assert!(!init.contains("appendChild("));
    }

    #[test]
    fn test_session_failure_is_retryable() {
        let init = init_chatkit_source();
        assert!(init.contains("showError(`${BOOT.failurePrefix}: ${error.message}`, true);"));
        assert!(BOOTSTRAP_JS.contains("retryButton.style.display = retryable ? '' : 'none';"));
    }

    #[test]
    fn test_hostile_config_cannot_close_script() {
        let script = bootstrap_script(&config("</script><script>alert(1)//")).unwrap();
        assert!(!script.contains("</script"));
    }
}
