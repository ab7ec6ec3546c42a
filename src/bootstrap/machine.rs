use std::sync::Arc;

use super::retry::{poll_until, Clock, PollOutcome, RetryPolicy, TokioClock};
use super::{
    BootstrapError, BootstrapPhase, ChatElement, ChatOptions, ChatSurface, ComponentRegistry,
    SessionSource, Theme, UiState, CHATKIT_ELEMENT, DEFAULT_POLICY,
};

/// Drives one page's bootstrap sequence.
///
/// `run` takes `&mut self`, so a second attempt cannot start while one is in
/// flight. Retrying is just calling `run` again; it always starts over from
/// [`BootstrapPhase::WaitingForComponent`].
pub struct Bootstrapper<R, S, U> {
    options: ChatOptions,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
    registry: R,
    sessions: S,
    surface: U,
    theme: Theme,
    phase: BootstrapPhase,
    ui_state: UiState,
    mounted: bool,
}

impl<R, S, U> Bootstrapper<R, S, U>
where
    R: ComponentRegistry,
    S: SessionSource,
    U: ChatSurface,
{
    pub fn new(options: ChatOptions, registry: R, sessions: S, surface: U) -> Self {
        Self {
            options,
            policy: DEFAULT_POLICY,
            clock: Arc::new(TokioClock),
            registry,
            sessions,
            surface,
            theme: Theme::Light,
            phase: BootstrapPhase::WaitingForComponent,
            ui_state: UiState::Loading,
            mounted: false,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    pub fn ui_state(&self) -> UiState {
        self.ui_state
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    /// Apply a theme change, updating the live element if there is one
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if self.mounted {
            self.surface.set_element_theme(theme);
        }
    }

    pub async fn run(&mut self) -> Result<(), BootstrapError> {
        self.phase = BootstrapPhase::WaitingForComponent;
        self.ui_state = UiState::Loading;
        self.surface.set_state(UiState::Loading);
        tracing::info!("Waiting for <{}> to register", CHATKIT_ELEMENT);

        let registry = &self.registry;
        let outcome = poll_until(&self.policy, self.clock.as_ref(), || {
            registry.is_defined(CHATKIT_ELEMENT)
        })
        .await;

        match outcome {
            PollOutcome::Exhausted { attempts } => {
                tracing::error!(
                    "Component <{}> not found after {} checks ({:?})",
                    CHATKIT_ELEMENT,
                    attempts,
                    self.policy.budget()
                );
                return Err(self.fail(
                    BootstrapPhase::ComponentTimeout,
                    BootstrapError::ComponentTimeout,
                ));
            }
            PollOutcome::Ready { waited } => {
                tracing::info!(
                    "Component loaded after {:?}",
                    self.policy.interval * waited
                );
            }
        }

        self.surface.hide_error();
        self.phase = BootstrapPhase::SessionPending;

        let grant = match self.sessions.create_session().await {
            Ok(grant) => grant,
            Err(message) => {
                return Err(self.fail(
                    BootstrapPhase::SessionError,
                    BootstrapError::Session(message),
                ))
            }
        };
        tracing::info!("Session created: {}", grant.id);

        self.surface.mount(ChatElement {
            tag: CHATKIT_ELEMENT,
            session_token: grant.client_secret,
            placeholder: self.options.placeholder.clone(),
            greeting_text: self.options.greeting.clone(),
            theme: self.theme,
        });
        self.mounted = true;
        self.phase = BootstrapPhase::Ready;
        self.ui_state = UiState::Ready;
        self.surface.set_state(UiState::Ready);
        Ok(())
    }

    fn fail(&mut self, phase: BootstrapPhase, error: BootstrapError) -> BootstrapError {
        tracing::error!("{}", error);
        self.surface.show_error(&error.to_string(), error.is_retryable());
        self.phase = phase;
        self.ui_state = UiState::Error;
        self.surface.set_state(UiState::Error);
        error
    }
}
